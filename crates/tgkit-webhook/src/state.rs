//! Application state shared across requests.

use std::sync::Arc;

use tgkit_api::{Bot, BotConfig, Transport, Update};

use crate::config::WebhookConfig;
use crate::handler::UpdateHandler;

/// Application state shared across all requests.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<WebhookConfig>,
    /// Gateway configuration used for every per-request [`Bot`].
    pub bot_config: Arc<BotConfig>,
    /// Transport shared by every per-request [`Bot`].
    pub transport: Arc<dyn Transport>,
    /// Application logic.
    pub handler: Arc<dyn UpdateHandler>,
}

impl AppState {
    pub fn new(
        config: WebhookConfig,
        bot_config: BotConfig,
        transport: Arc<dyn Transport>,
        handler: impl UpdateHandler,
    ) -> Self {
        Self {
            config: Arc::new(config),
            bot_config: Arc::new(bot_config),
            transport,
            handler: Arc::new(handler),
        }
    }

    /// A gateway bound to `update`.
    pub fn bot_for(&self, update: Update) -> Bot {
        Bot::with_transport(self.bot_config.clone(), self.transport.clone()).with_update(update)
    }
}
