use crate::model::card::GeneratedCard;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const TEST_CARD_NOTE: &str = "TEST USE ONLY - Not valid for real transactions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CardResponse {
    pub identifier: String,
    pub masked_identifier: String,
    pub source_prefix: String,
    pub brand_hint: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub security_code: String,
    pub note: String,
}

impl From<GeneratedCard> for CardResponse {
    fn from(card: GeneratedCard) -> Self {
        CardResponse {
            masked_identifier: card.masked(),
            brand_hint: card.brand_hint(),
            identifier: card.identifier,
            source_prefix: card.source_prefix,
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
            security_code: card.security_code,
            note: TEST_CARD_NOTE.to_string(),
        }
    }
}
