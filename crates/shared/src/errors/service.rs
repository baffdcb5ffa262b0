use crate::errors::GenerateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Generate(err) => err.kind(),
            ServiceError::Validation(_) => "validation",
            ServiceError::Upload(_) => "upload",
            ServiceError::Internal(_) => "internal",
        }
    }
}
