use crate::utils::mask_card_number;
use serde::{Deserialize, Serialize};

/// One synthesized test card. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub identifier: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub security_code: String,
    pub source_prefix: String,
    pub brand: String,
}

impl GeneratedCard {
    pub fn masked(&self) -> String {
        mask_card_number(&self.identifier)
    }

    pub fn brand_hint(&self) -> String {
        format!("{} (test)", self.brand)
    }

    /// `IDENTIFIER|MM|YY|CODE`
    pub fn to_pipe_line(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.identifier, self.expiry_month, self.expiry_year, self.security_code
        )
    }
}
