//! Application hook invoked for each update.

use serde_json::Value;
use tgkit_api::Bot;

/// Handles one update.
///
/// Runs on a blocking thread with a [`Bot`] bound to the update. Returning
/// `Some(body)` answers the webhook request with that body (see
/// [`tgkit_api::webhook_reply`]); `None` answers with a plain `ok`.
pub trait UpdateHandler: Send + Sync + 'static {
    fn handle(&self, bot: &Bot) -> Option<Value>;
}

impl<F> UpdateHandler for F
where
    F: Fn(&Bot) -> Option<Value> + Send + Sync + 'static,
{
    fn handle(&self, bot: &Bot) -> Option<Value> {
        self(bot)
    }
}
