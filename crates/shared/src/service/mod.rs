mod bin;
mod card;

pub use self::bin::{BinCommandService, BinQueryService};
pub use self::card::CardGenerateService;
