//! Webhook server for tgkit bots.
//!
//! Receives updates on `POST /webhook`, drops redelivered copies through the
//! [`DeliveryGuard`](tgkit_persistence::DeliveryGuard), and runs an
//! [`UpdateHandler`] on a blocking thread with a [`Bot`](tgkit_api::Bot)
//! bound to the update. Handler panics are reported to the operator chats.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tgkit_api::{BotConfig, HttpTransport};
//! use tgkit_webhook::{serve, AppState, DemoBot, WebhookConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot_config = BotConfig::from_env()?;
//!     let transport = Arc::new(HttpTransport::new(bot_config.timeout)?);
//!     let state = AppState::new(WebhookConfig::default(), bot_config, transport, DemoBot);
//!
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod handler;
pub mod recover;
pub mod router;
pub mod state;
pub mod webhook;

pub use config::WebhookConfig;
pub use demo::DemoBot;
pub use error::{Result, WebhookError};
pub use handler::UpdateHandler;
pub use recover::{catch_panic, HandlerPanic};
pub use router::{create_router, serve};
pub use state::AppState;
