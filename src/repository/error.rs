//! Repository and transport error definitions.

use thiserror::Error;

/// Failure talking to the backend resource.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent, timed out, or the body did not decode.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend not reachable for another reason.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Update or delete without a usable id. No request was sent.
    #[error("record has no usable identifier")]
    MissingIdentifier,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
