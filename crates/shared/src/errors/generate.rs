use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Invalid BIN '{bin}': {reason}")]
    InvalidPrefix { bin: String, reason: String },

    #[error("BIN {prefix} is too long for inferred card length {total_length}")]
    PrefixTooLong { prefix: String, total_length: usize },

    #[error(
        "Requested {requested} BINs but only {available} are available and wrap-around is disabled"
    )]
    CountExceedsAvailable { requested: usize, available: usize },

    #[error("No active BINs, upload BINs first")]
    NoActivePrefixes,

    #[error("No valid cards could be generated")]
    NoValidOutput,
}

impl GenerateError {
    pub fn invalid_prefix(bin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPrefix {
            bin: bin.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPrefix { .. } => "invalid_prefix",
            Self::PrefixTooLong { .. } => "prefix_too_long",
            Self::CountExceedsAvailable { .. } => "count_exceeds_available",
            Self::NoActivePrefixes => "no_active_prefixes",
            Self::NoValidOutput => "no_valid_output",
        }
    }
}
