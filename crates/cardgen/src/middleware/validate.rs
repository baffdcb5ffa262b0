use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use shared::errors::{AppErrorHttp, ServiceError, validation_messages};
use validator::Validate;

/// JSON body that has already passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppErrorHttp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::Validation(vec![rejection.body_text()]))?;

        value
            .validate()
            .map_err(|errors| ServiceError::Validation(validation_messages(&errors)))?;

        Ok(SimpleValidatedJson(value))
    }
}
