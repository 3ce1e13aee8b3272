//! HTTP error type.
//!
//! Every handler returns `Result<T, ApiError>`. Domain failures are translated
//! here, once, into a status code and a `{"detail": ...}` body. Downstream
//! failures are logged with full detail; the caller only sees a fixed
//! per-operation message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::common::{ServiceError, ServiceResult};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was malformed or a field broke a rule.
    #[error("unprocessable request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A downstream failure; carries the message shown to the caller.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Translate a domain failure. `public_message` is what the caller sees
    /// when the failure is internal.
    pub fn from_service(err: ServiceError, public_message: &'static str) -> Self {
        match err {
            ServiceError::Validation(message) => ApiError::Validation(message),
            ServiceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ServiceError::Provider(_) | ServiceError::Storage(_) => {
                error!(error = %err, "{}", public_message);
                ApiError::Internal(public_message)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Validation(message) | ApiError::NotFound(message) => message,
            ApiError::Internal(message) => message.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Attach the caller-facing message to a domain result.
pub trait ServiceResultExt<T> {
    fn or_api(self, public_message: &'static str) -> Result<T, ApiError>;
}

impl<T> ServiceResultExt<T> for ServiceResult<T> {
    fn or_api(self, public_message: &'static str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::from_service(err, public_message))
    }
}
