//! API error type mapping to HTTP status codes and the `{ "error": ... }` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::domain::DomainError;

pub const EMPTY_MESSAGE: &str = "Message cannot be empty";
pub const INVALID_BODY: &str = "Invalid request body";
pub const UPSTREAM_FAILURE: &str = "Failed to get AI response";

#[derive(Debug)]
pub enum ApiError {
    /// Client sent something unusable. Rendered verbatim.
    Validation(String),
    /// Completion call failed. Only a generic message reaches the client.
    Upstream(String),
    /// Storage, I/O or encoding failure. The relay itself recovers from
    /// storage errors, so this is only produced by handlers calling the
    /// fallible store operations directly.
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => ApiError::Validation(msg),
            DomainError::UpstreamError(msg) => ApiError::Upstream(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(detail) => {
                error!("Completion API error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE.to_string())
            }
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
