//! Recording transport shared by the gateway integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tgkit_api::{ApiError, ArgValue, Args, Bot, BotConfig, Transport, Update};

type Responder = Box<dyn Fn(&str, &Args) -> tgkit_api::Result<String> + Send + Sync>;

/// One request seen by the transport.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub method: String,
    pub args: Args,
}

impl Recorded {
    pub fn json(&self, key: &str) -> Option<Value> {
        self.args.get(key).and_then(ArgValue::as_json).cloned()
    }
}

/// Answers POSTs through a closure and records them.
pub struct MockTransport {
    respond: Responder,
    files: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<Recorded>>,
    downloads: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &Args) -> tgkit_api::Result<String> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            files: HashMap::new(),
            requests: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    /// Every call succeeds; sends echo back a message.
    pub fn echo() -> Self {
        Self::new(|_, args| Ok(echo_message(args)))
    }

    /// Every call fails with `{"ok":false,"error_code":400,"description":"bad"}`.
    pub fn failing() -> Self {
        Self::new(|_, _| Ok(bad_request()))
    }

    /// Every request fails before reaching the server.
    pub fn offline() -> Self {
        Self::new(|_, _| Err(ApiError::HttpError("connection refused".to_string())))
    }

    /// Serves `bytes` for GETs of URLs ending in `file_path`.
    pub fn with_file(mut self, file_path: &str, bytes: &[u8]) -> Self {
        self.files.insert(file_path.to_string(), bytes.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.method).collect()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn post(&self, url: &str, args: &Args) -> tgkit_api::Result<String> {
        let method = url.rsplit('/').next().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(Recorded {
            url: url.to_string(),
            method: method.clone(),
            args: args.clone(),
        });
        (self.respond)(&method, args)
    }

    fn get(&self, url: &str) -> tgkit_api::Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.files
            .iter()
            .find(|(path, _)| url.ends_with(path.as_str()))
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| ApiError::HttpError("404 Not Found".to_string()))
    }
}

pub fn bad_request() -> String {
    r#"{"ok":false,"error_code":400,"description":"bad"}"#.to_string()
}

/// A successful send of `args.text` to `args.chat_id`.
pub fn echo_message(args: &Args) -> String {
    let chat_id = args
        .get("chat_id")
        .and_then(ArgValue::as_json)
        .cloned()
        .unwrap_or(Value::Null);
    json!({
        "ok": true,
        "result": {
            "message_id": 100,
            "date": 0,
            "chat": {"id": chat_id, "type": "private"},
            "text": args.get_str("text").unwrap_or_default(),
        }
    })
    .to_string()
}

/// A text message from user 7 in private chat 42.
pub fn private_message() -> Update {
    Update::new(json!({
        "update_id": 500,
        "message": {
            "message_id": 10,
            "date": 1,
            "text": "/start",
            "from": {"id": 7, "first_name": "Ann"},
            "chat": {"id": 42, "type": "private"}
        }
    }))
}

pub fn bot_with(config: BotConfig, transport: &Arc<MockTransport>) -> Bot {
    Bot::with_transport(config, transport.clone()).with_update(private_message())
}

pub fn reporting_config() -> BotConfig {
    BotConfig::new("123:abc")
        .with_api_url("http://api.local")
        .with_report_chats([99])
}
