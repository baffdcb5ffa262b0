mod gracefull;
mod logs;
mod mark;
mod metrics;
mod upload;

pub use self::gracefull::shutdown_signal;
pub use self::logs::Logger;
pub use self::mark::mask_card_number;
pub use self::metrics::Metrics;
pub use self::upload::parse_upload;
