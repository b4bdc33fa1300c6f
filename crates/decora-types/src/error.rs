use thiserror::Error;

/// Errors from chat store and session registry operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors from the text, image, and multimodal generation backends.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("generation backend returned no output")]
    EmptyResponse,

    #[error("image processing error: {0}")]
    Image(String),
}

/// Errors from the request router pipelines.
///
/// `EmptyPrompt` is the one client-input error in the taxonomy and maps to
/// HTTP 400; everything else in this file maps to 500.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from credential load, refresh, and interactive authorization.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token cache error: {0}")]
    Cache(String),

    #[error("malformed client secret: {0}")]
    ClientSecret(String),

    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("authorization failed: {0}")]
    AuthorizationFailed(String),
}

/// Errors from the file-hosting upload operation.
///
/// A failure at any stage aborts the whole upload; a file created before a
/// permission failure is left behind (no rollback).
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("file creation failed: {0}")]
    Create(String),

    #[error("permission update failed: {0}")]
    Permission(String),
}
