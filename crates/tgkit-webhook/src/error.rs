//! Webhook error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for webhook operations.
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Errors answered to the webhook caller.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request body is not an update.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WebhookError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebhookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}

impl From<tgkit_update::UpdateError> for WebhookError {
    fn from(err: tgkit_update::UpdateError) -> Self {
        WebhookError::BadRequest(err.to_string())
    }
}

impl From<tgkit_persistence::PersistenceError> for WebhookError {
    fn from(err: tgkit_persistence::PersistenceError) -> Self {
        WebhookError::Internal(err.to_string())
    }
}
