//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Every error response is JSON `{"detail": "..."}`: 400 for client input
//! errors, 500 for upstream/backend failures. No retry happens at this
//! boundary; the service keeps serving after any single request fails.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use decora_types::error::{CredentialError, RelayError, StoreError, UploadError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request input (missing/empty field).
    Validation(String),
    /// Relay pipeline failure.
    Relay(RelayError),
    /// Chat store or session registry failure.
    Store(StoreError),
    /// Credential load/refresh/authorization failure.
    Credential(CredentialError),
    /// Drive upload failure.
    Upload(UploadError),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        AppError::Credential(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Upload(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Relay(RelayError::EmptyPrompt) => (
                StatusCode::BAD_REQUEST,
                RelayError::EmptyPrompt.to_string(),
            ),
            AppError::Relay(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Credential(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Upload(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(%detail, "request failed");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
