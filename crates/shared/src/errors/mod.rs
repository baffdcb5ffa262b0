mod errors;
mod generate;
mod http;
mod service;
mod validate;

pub use self::errors::ErrorResponse;
pub use self::generate::GenerateError;
pub use self::http::AppErrorHttp;
pub use self::service::ServiceError;
pub use self::validate::validation_messages;
