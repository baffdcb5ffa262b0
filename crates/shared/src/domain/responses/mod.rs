mod api;
mod bin;
mod card;
mod health;

pub use self::api::ApiResponse;
pub use self::bin::BinSetResponse;
pub use self::card::{CardResponse, TEST_CARD_NOTE};
pub use self::health::HealthResponse;
