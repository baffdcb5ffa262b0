use crate::errors::{ErrorResponse, GenerateError, ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<GenerateError> for AppErrorHttp {
    fn from(err: GenerateError) -> Self {
        Self(ServiceError::Generate(err))
    }
}

impl AppErrorHttp {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Generate(err) => match err {
                GenerateError::InvalidPrefix { .. }
                | GenerateError::CountExceedsAvailable { .. }
                | GenerateError::NoActivePrefixes => StatusCode::BAD_REQUEST,
                GenerateError::PrefixTooLong { .. } | GenerateError::NoValidOutput => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            ServiceError::Validation(_) | ServiceError::Upload(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self.0 {
            ServiceError::Generate(err) => {
                warn!("🎴 Generation rejected: {err}");
                err.to_string()
            }
            ServiceError::Validation(errors) => {
                warn!("📝 Validation failed: {errors:?}");
                format!("Validation failed: {}", errors.join("; "))
            }
            ServiceError::Upload(msg) => {
                warn!("📤 Upload rejected: {msg}");
                format!("Failed to read upload: {msg}")
            }
            ServiceError::Internal(msg) => {
                error!("💥 Internal error: {msg}");
                msg
            }
        };

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message,
        });

        (status, body).into_response()
    }
}
