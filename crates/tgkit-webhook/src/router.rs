//! Router configuration and server setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;
use crate::webhook;

/// Creates the router: the update route from the config plus `/health`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(&state.config.path, post(webhook::receive))
        .route("/health", get(webhook::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the webhook server.
pub async fn serve(state: AppState) -> Result<(), std::io::Error> {
    let addr = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, path = %state.config.path, "Webhook server listening");
    axum::serve(listener, create_router(state)).await
}
