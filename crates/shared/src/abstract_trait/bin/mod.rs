mod command;
mod query;

pub use self::command::{BinCommandServiceTrait, DynBinCommandService};
pub use self::query::{BinQueryServiceTrait, DynBinQueryService};
