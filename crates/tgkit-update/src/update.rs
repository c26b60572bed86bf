//! The [`Update`] wrapper and its field lookups.

use std::io::Read;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, UpdateError};
use crate::summary::{ChatSummary, UpdateSummary};

/// Key holding the update identifier. Never treated as the kind field.
const UPDATE_ID_KEY: &str = "update_id";

/// Nested key consulted by the `get_value` fallback.
const MESSAGE_KEY: &str = "message";

/// Update kinds whose payload carries the originating `message`.
const MESSAGE_CARRYING_KINDS: &[&str] = &["callback_query"];

/// When `get_value` may fall back into `update[kind]["message"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Fall back for every update kind.
    #[default]
    Always,
    /// Fall back only for kinds whose payload carries a message
    /// (`callback_query`).
    MessageCarrying,
    /// Never fall back; only the kind payload itself is searched.
    Never,
}

impl FallbackPolicy {
    /// Whether a lookup on `kind` may consult the nested message.
    pub fn allows(self, kind: &str) -> bool {
        match self {
            FallbackPolicy::Always => true,
            FallbackPolicy::MessageCarrying => MESSAGE_CARRYING_KINDS.contains(&kind),
            FallbackPolicy::Never => false,
        }
    }
}

/// A single incoming update plus its cached kind.
///
/// All lookups return `None` for missing or `null` fields; nothing here
/// panics or errors once the update has been decoded.
#[derive(Debug, Clone, Default)]
pub struct Update {
    data: Value,
    kind: Option<String>,
    policy: FallbackPolicy,
}

impl Update {
    /// Wraps an already decoded update.
    pub fn new(data: Value) -> Self {
        let kind = detect_kind(&data);
        Self {
            data,
            kind,
            policy: FallbackPolicy::default(),
        }
    }

    /// Decodes an update from JSON text.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or not a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(json)?;
        if !data.is_object() {
            return Err(UpdateError::NotAnObject(json_type_name(&data)));
        }
        Ok(Self::new(data))
    }

    /// Reads and decodes an update from a request body.
    ///
    /// An empty body yields an empty update with no kind.
    ///
    /// # Errors
    /// Returns an error if reading fails or the body is not a JSON object.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        if body.trim().is_empty() {
            debug!("Empty update body");
            return Ok(Self::default());
        }
        Self::from_json(&body)
    }

    /// Sets the fallback policy used by `get_value`.
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The fallback policy in effect.
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Replaces the held update and recomputes its kind.
    pub fn set_data(&mut self, data: Value) {
        self.kind = detect_kind(&data);
        self.data = data;
        trace!(kind = ?self.kind, "Update data replaced");
    }

    /// The raw update.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Name of the populated kind field (`message`, `callback_query`, ...).
    pub fn update_type(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// The payload under the kind field.
    pub fn payload(&self) -> Option<&Value> {
        self.data.get(self.kind.as_deref()?)
    }

    /// Looks up `field` under the kind payload, then under
    /// `payload.message` when the policy allows it.
    pub fn get_value(&self, field: &str) -> Option<&Value> {
        let kind = self.kind.as_deref()?;
        let payload = self.data.get(kind)?;

        if let Some(value) = non_null(payload.get(field)) {
            return Some(value);
        }
        if !self.policy.allows(kind) {
            return None;
        }
        non_null(payload.get(MESSAGE_KEY)?.get(field))
    }

    fn get_str(&self, field: &str) -> Option<&str> {
        self.get_value(field)?.as_str()
    }

    fn get_i64(&self, field: &str) -> Option<i64> {
        self.get_value(field)?.as_i64()
    }

    fn nested_str(&self, field: &str, key: &str) -> Option<&str> {
        self.get_value(field)?.get(key)?.as_str()
    }

    fn top_level(&self, key: &str) -> Option<&Value> {
        non_null(self.data.get(key))
    }

    // Named accessors

    pub fn text(&self) -> Option<&str> {
        self.get_str("text")
    }

    pub fn chat(&self) -> Option<&Value> {
        self.get_value("chat")
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.chat()?.get("id")?.as_i64()
    }

    pub fn chat_type(&self) -> Option<&str> {
        self.nested_str("chat", "type")
    }

    pub fn message_id(&self) -> Option<i64> {
        self.get_i64("message_id")
    }

    pub fn date(&self) -> Option<i64> {
        self.get_i64("date")
    }

    /// The sender object (`from`).
    pub fn sender(&self) -> Option<&Value> {
        self.get_value("from")
    }

    pub fn user_id(&self) -> Option<i64> {
        self.sender()?.get("id")?.as_i64()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.nested_str("from", "first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.nested_str("from", "last_name")
    }

    /// First name followed by the last name, when present.
    pub fn name(&self) -> Option<String> {
        let first = self.first_name().filter(|f| !f.is_empty())?;
        match self.last_name().filter(|l| !l.is_empty()) {
            Some(last) => Some(format!("{} {}", first, last)),
            None => Some(first.to_string()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.nested_str("from", "username")
    }

    pub fn language(&self) -> Option<&str> {
        self.nested_str("from", "language_code")
    }

    pub fn reply_to_message(&self) -> Option<&Value> {
        self.get_value("reply_to_message")
    }

    pub fn caption(&self) -> Option<&str> {
        self.get_str("caption")
    }

    pub fn location(&self) -> Option<&Value> {
        self.get_value("location")
    }

    pub fn photo(&self) -> Option<&Value> {
        self.get_value("photo")
    }

    pub fn video(&self) -> Option<&Value> {
        self.get_value("video")
    }

    pub fn document(&self) -> Option<&Value> {
        self.get_value("document")
    }

    pub fn forward_from(&self) -> Option<&Value> {
        self.get_value("forward_from")
    }

    pub fn forward_from_chat(&self) -> Option<&Value> {
        self.get_value("forward_from_chat")
    }

    /// Message entities, or caption entities for media messages.
    pub fn entities(&self) -> Option<&Value> {
        self.get_value("entities")
            .or_else(|| self.get_value("caption_entities"))
    }

    // Top-level accessors: these never consult the nested message.

    pub fn inline_query(&self) -> Option<&Value> {
        self.top_level("inline_query")
    }

    pub fn chosen_inline_result(&self) -> Option<&Value> {
        self.top_level("chosen_inline_result")
    }

    pub fn shipping_query(&self) -> Option<&Value> {
        self.top_level("shipping_query")
    }

    pub fn pre_checkout_query(&self) -> Option<&Value> {
        self.top_level("pre_checkout_query")
    }

    pub fn callback_query(&self) -> Option<&Value> {
        self.top_level("callback_query")
    }

    pub fn update_id(&self) -> Option<i64> {
        self.top_level(UPDATE_ID_KEY)?.as_i64()
    }

    /// Whether the current chat is a group or supergroup.
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type(), Some("group") | Some("supergroup"))
    }

    /// Whether the current chat is a private chat.
    pub fn is_private(&self) -> bool {
        self.chat_type() == Some("private")
    }

    /// Condenses the update for diagnostics.
    ///
    /// String fields are cut to `max_len` characters. The trigger text is the
    /// first of `data`, `query`, `text`, `caption`, `result_id` found directly
    /// in the payload, or the kind name.
    pub fn summary(&self, max_len: usize) -> UpdateSummary {
        let kind = self.kind.clone();
        let payload = self.payload();
        let field = |key: &str| payload.and_then(|p| non_null(p.get(key)));
        let nested = |key: &str| {
            field(key).or_else(|| payload.and_then(|p| non_null(p.get(MESSAGE_KEY)?.get(key))))
        };

        let text = ["data", "query", "text", "caption", "result_id"]
            .iter()
            .find_map(|key| field(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| kind.clone())
            .unwrap_or_default();

        let sender = field("from");
        let sender_id = sender.and_then(|s| s.get("id")).and_then(Value::as_i64);
        let sender_name = sender
            .and_then(|s| s.get("first_name"))
            .and_then(Value::as_str)
            .map(|s| truncate_chars(s, max_len));

        let chat = nested("chat").map(|chat| ChatSummary {
            id: chat.get("id").and_then(Value::as_i64),
            chat_type: chat.get("type").and_then(Value::as_str).map(str::to_string),
            username: chat.get("username").and_then(Value::as_str).map(str::to_string),
            title: chat
                .get("title")
                .and_then(Value::as_str)
                .map(|t| truncate_chars(t, max_len)),
        });

        UpdateSummary {
            kind,
            text: truncate_chars(&text, max_len),
            sender_id,
            sender_name,
            chat,
            message_id: nested("message_id").and_then(Value::as_i64),
        }
    }
}

impl From<Value> for Update {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

/// The first non-`update_id` key holding an object.
fn detect_kind(data: &Value) -> Option<String> {
    data.as_object()?
        .iter()
        .find(|(key, value)| key.as_str() != UPDATE_ID_KEY && value.is_object())
        .map(|(key, _)| key.clone())
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
