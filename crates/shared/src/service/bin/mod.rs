mod command;
mod query;

pub use self::command::BinCommandService;
pub use self::query::BinQueryService;
