//! Error types for the API gateway.
//!
//! `Bot::call` never returns these; they cover configuration, file transfers
//! and the raw transport.

use thiserror::Error;

/// Errors that can occur outside of ordinary method calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TGKIT_BOT_TOKEN environment variable.")]
    NoToken,

    /// A configuration value could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The platform answered a call with `ok: false`.
    #[error("{method} failed: {description}")]
    MethodFailed { method: String, description: String },

    /// A successful response lacked an expected field.
    #[error("response to {method} has no {field}")]
    MissingField { method: String, field: String },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs embed the bot token; never surface them.
        ApiError::HttpError(e.without_url().to_string())
    }
}
