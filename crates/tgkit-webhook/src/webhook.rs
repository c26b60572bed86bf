//! Request handlers.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tgkit_api::Update;
use tgkit_persistence::DeliveryGuard;
use tracing::{debug, error};

use crate::error::{Result, WebhookError};
use crate::recover::catch_panic;
use crate::state::AppState;

/// POST {path} - Receives one update.
///
/// Answers with the handler's webhook reply as JSON, or `ok`.
pub async fn receive(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let update = Update::from_reader(&body[..])?;
    debug!(
        update_id = ?update.update_id(),
        kind = ?update.update_type(),
        "Received update"
    );

    let reply = tokio::task::spawn_blocking(move || process(&state, update))
        .await
        .map_err(|e| {
            error!(error = %e, "Update task failed");
            WebhookError::Internal("update handler failed".to_string())
        })??;

    Ok(match reply {
        Some(body) => Json(body).into_response(),
        None => "ok".into_response(),
    })
}

/// Runs the handler for `update` under the delivery guard.
///
/// Returns `None` without running the handler when the update is already
/// being handled. A panicking handler is reported to the operator chats.
pub fn process(state: &AppState, update: Update) -> Result<Option<Value>> {
    let _guard = match (&state.config.marker_dir, update.update_id()) {
        (Some(dir), Some(update_id)) => match DeliveryGuard::acquire(dir, update_id)? {
            Some(guard) => Some(guard),
            None => return Ok(None),
        },
        _ => None,
    };

    let bot = state.bot_for(update);
    catch_panic(|| state.handler.handle(&bot)).map_err(|panic| {
        error!(
            message = %panic.message,
            file = %panic.file,
            line = panic.line,
            "Update handler panicked"
        );
        bot.report_panic(&panic.message, &panic.file, panic.line);
        WebhookError::Internal("update handler panicked".to_string())
    })
}

/// GET /health - Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
