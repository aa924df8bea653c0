//! # HTTP API Errors
//!
//! Every error maps to a fixed status code. Response bodies never carry
//! error detail; the detail goes to the log instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Empty id path segment
    #[error("Missing todo id")]
    MissingId,

    /// Request body failed to decode
    #[error("Malformed request body: {0}")]
    MalformedInput(String),

    /// Referenced todo does not exist
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// The store returned a todo without an id
    #[error("Store did not assign an id")]
    MissingAssignedId,

    /// Response encoding failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingId => StatusCode::BAD_REQUEST,
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingAssignedId => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        status.into_response()
    }
}
