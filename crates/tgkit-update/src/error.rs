//! Error types for decoding updates.

use thiserror::Error;

/// Errors that can occur while decoding an inbound update body.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Body was not valid JSON.
    #[error("failed to parse update: {0}")]
    Parse(#[from] serde_json::Error),

    /// Body was valid JSON but not an object.
    #[error("update must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Reading the body failed.
    #[error("failed to read update body: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for update decoding.
pub type Result<T> = std::result::Result<T, UpdateError>;
