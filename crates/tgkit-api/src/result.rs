//! Decoded responses of API calls.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// The decoded response of one call.
///
/// Always carries an `ok` flag. Lookups through [`MethodResult::get`] search
/// the top level first and then the `result` object, so `result.get("message_id")`
/// works directly on a `sendMessage` response.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResult {
    raw: String,
    data: Value,
}

impl MethodResult {
    /// Decodes a response body. Bodies that are not a JSON object become a
    /// failed result.
    pub fn from_body(body: impl Into<String>) -> Self {
        let body = body.into();
        match serde_json::from_str::<Value>(&body) {
            Ok(data) if data.is_object() => Self { raw: body, data },
            _ => Self::failure("invalid response body"),
        }
    }

    /// A failed result with no payload, used when no response was received.
    pub fn failure(description: impl Into<String>) -> Self {
        let data = json!({"ok": false, "description": description.into()});
        Self {
            raw: data.to_string(),
            data,
        }
    }

    pub fn ok(&self) -> bool {
        self.data.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }

    /// The `result` payload of a successful call.
    pub fn result(&self) -> Option<&Value> {
        self.data.get("result").filter(|v| !v.is_null())
    }

    /// `data[key]`, falling back to `data.result[key]`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data
            .get(key)
            .filter(|v| !v.is_null())
            .or_else(|| self.result()?.get(key).filter(|v| !v.is_null()))
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    pub fn error_code(&self) -> Option<i64> {
        self.data.get("error_code").and_then(Value::as_i64)
    }

    pub fn description(&self) -> Option<&str> {
        self.data.get("description").and_then(Value::as_str)
    }

    /// Seconds to wait before retrying, from a flood-control error.
    pub fn retry_after(&self) -> Option<i64> {
        self.data.get("parameters")?.get("retry_after")?.as_i64()
    }

    /// The body as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    /// Deserializes the `result` payload.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.result()?.clone()).ok()
    }

    /// The message a successful send or edit produced.
    pub fn message_ref(&self) -> Option<MessageRef> {
        let result = self.result()?;
        Some(MessageRef {
            chat_id: result.get("chat")?.get("id")?.as_i64()?,
            message_id: result.get("message_id")?.as_i64()?,
            text: result.get("text").and_then(Value::as_str).map(str::to_string),
        })
    }
}

impl fmt::Display for MethodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// Identifies a message sent or edited by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
    /// Text of the message when it was sent.
    pub text: Option<String>,
}
