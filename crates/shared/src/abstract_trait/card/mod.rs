mod generate;

pub use self::generate::{CardGenerateServiceTrait, DynCardGenerateService};
