//! Condensed view of an update, used when reporting failed API calls.

use serde::Serialize;

/// The chat an update happened in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub id: Option<i64>,
    pub chat_type: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
}

impl ChatSummary {
    /// Whether this is a one-to-one chat with a user.
    pub fn is_private(&self) -> bool {
        self.chat_type.as_deref() == Some("private")
    }
}

/// Who triggered an update, where, and with what text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    /// Update kind, if any.
    pub kind: Option<String>,
    /// Callback data, query, text, caption or result id (truncated).
    pub text: String,
    pub sender_id: Option<i64>,
    pub sender_name: Option<String>,
    pub chat: Option<ChatSummary>,
    pub message_id: Option<i64>,
}
