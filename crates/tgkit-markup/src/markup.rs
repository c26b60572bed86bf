//! The `reply_markup` union.

use serde::Serialize;

use crate::inline::InlineKeyboard;
use crate::keyboard::{ForceReply, KeyboardRemove, ReplyKeyboard};

/// Any value accepted as a message's `reply_markup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Inline(InlineKeyboard),
    Keyboard(ReplyKeyboard),
    Remove(KeyboardRemove),
    ForceReply(ForceReply),
}

impl ReplyMarkup {
    /// Compact JSON, ready to be sent as a string field.
    ///
    /// Forward slashes and non-ASCII characters are left unescaped.
    pub fn to_json(&self) -> String {
        // Only string keys and plain values: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The markup as a JSON value.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl From<InlineKeyboard> for ReplyMarkup {
    fn from(markup: InlineKeyboard) -> Self {
        ReplyMarkup::Inline(markup)
    }
}

impl From<ReplyKeyboard> for ReplyMarkup {
    fn from(markup: ReplyKeyboard) -> Self {
        ReplyMarkup::Keyboard(markup)
    }
}

impl From<KeyboardRemove> for ReplyMarkup {
    fn from(markup: KeyboardRemove) -> Self {
        ReplyMarkup::Remove(markup)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(markup: ForceReply) -> Self {
        ReplyMarkup::ForceReply(markup)
    }
}

impl std::fmt::Display for ReplyMarkup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_json())
    }
}
