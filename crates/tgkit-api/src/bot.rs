//! The API gateway.

use std::cell::Cell;
use std::fmt;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tgkit_update::Update;
use tracing::{debug, error, info, warn};

use crate::args::Args;
use crate::config::{BotConfig, ReportMode};
use crate::error::{ApiError, Result};
use crate::report;
use crate::result::MethodResult;
use crate::transport::{HttpTransport, Transport};

/// Gateway to the Bot API, bound to the update being handled.
///
/// A `Bot` is cheap to build: create one per incoming update and drop it when
/// the update has been handled. Configuration and transport are shared.
pub struct Bot {
    config: Arc<BotConfig>,
    transport: Arc<dyn Transport>,
    update: Update,
    /// Depth of nested [`Bot::quietly`] scopes.
    suppressed: Cell<u32>,
}

impl Bot {
    /// Creates a gateway using the blocking HTTP transport.
    pub fn new(config: impl Into<Arc<BotConfig>>) -> Result<Self> {
        let config = config.into();
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a gateway on top of an existing transport.
    pub fn with_transport(config: impl Into<Arc<BotConfig>>, transport: Arc<dyn Transport>) -> Self {
        let config = config.into();
        let update = Update::default().with_policy(config.fallback);
        Self {
            config,
            transport,
            update,
            suppressed: Cell::new(0),
        }
    }

    /// Binds the gateway to `update`, applying the configured fallback policy.
    pub fn with_update(mut self, update: Update) -> Self {
        self.update = update.with_policy(self.config.fallback);
        self
    }

    /// The update being handled.
    pub fn update(&self) -> &Update {
        &self.update
    }

    /// Replaces the held update.
    pub fn set_data(&mut self, data: Value) {
        self.update.set_data(data);
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// `{api_url}/bot{token}/{method}`
    pub fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.config.api_url, self.config.token, method)
    }

    /// `{api_url}/file/bot{token}/{file_path}`
    pub fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.config.api_url, self.config.token, file_path
        )
    }

    /// Calls any Bot API method.
    ///
    /// The method name is sent as given. Failures, including network errors,
    /// come back as a result with `ok == false`. When reporting is enabled a
    /// failed call also produces one diagnostic naming the caller's file and
    /// line.
    #[track_caller]
    pub fn call(&self, method: &str, args: Args) -> MethodResult {
        let caller = Location::caller();
        let result = self.post(method, &args);

        if !result.ok() {
            debug!(
                method = %method,
                error_code = ?result.error_code(),
                description = ?result.description(),
                "API call failed"
            );
            if self.should_report() {
                self.report(method, caller, &result);
            }
        }

        result
    }

    fn post(&self, method: &str, args: &Args) -> MethodResult {
        debug!(method = %method, args = args.len(), "Calling API method");
        match self.transport.post(&self.api_url(method), args) {
            Ok(body) => MethodResult::from_body(body),
            Err(e) => {
                warn!(method = %method, error = %e, "API request failed");
                MethodResult::failure(e.to_string())
            }
        }
    }

    /// Runs `f` with diagnostics for failed calls suppressed, unless the
    /// config disables `obey_suppression`.
    pub fn quietly<T>(&self, f: impl FnOnce(&Self) -> T) -> T {
        self.suppressed.set(self.suppressed.get() + 1);
        let _scope = Suppressed(&self.suppressed);
        f(self)
    }

    fn should_report(&self) -> bool {
        let report = &self.config.report;
        report.enabled() && !(report.obey_suppression && self.suppressed.get() > 0)
    }

    fn report(&self, method: &str, caller: &Location<'_>, result: &MethodResult) {
        let text = report::render(&self.config, method, caller, result, &self.update);
        self.deliver_report(&text);
    }

    /// Reports a panic raised at `file:line` while handling the held update.
    ///
    /// Does nothing unless operator chats are configured. Suppression scopes
    /// do not apply.
    pub fn report_panic(&self, message: &str, file: &str, line: u32) {
        if !self.config.report.enabled() {
            return;
        }
        let text = report::render_panic(&self.config, message, file, line, &self.update);
        self.deliver_report(&text);
    }

    fn deliver_report(&self, text: &str) {
        match self.config.report.mode {
            ReportMode::Message => {
                let parse_mode = report::uses_html(&self.config).then_some(self.config.parse_mode.as_str());
                self.send_to_operators(text, parse_mode);
            }
            ReportMode::Log => {
                error!("{}", text);
            }
        }
    }

    /// Sends `text` to every operator chat.
    ///
    /// Requests go straight to the transport and their outcome is only
    /// logged, so a failing report never triggers another one.
    pub fn log(&self, text: &str) {
        self.send_to_operators(text, Some(self.config.parse_mode.as_str()));
    }

    fn send_to_operators(&self, text: &str, parse_mode: Option<&str>) {
        let url = self.api_url("sendMessage");
        for chat in &self.config.report.chats {
            let args = Args::new()
                .set("chat_id", chat.as_str())
                .set("text", text)
                .set_opt("parse_mode", parse_mode)
                .set("disable_web_page_preview", true);

            match self.transport.post(&url, &args) {
                Ok(body) => {
                    let result = MethodResult::from_body(body);
                    if !result.ok() {
                        warn!(
                            chat = %chat,
                            description = ?result.description(),
                            "Failed to deliver report"
                        );
                    }
                }
                Err(e) => warn!(chat = %chat, error = %e, "Failed to deliver report"),
            }
        }
    }

    /// The JSON body answering the webhook request with a method call.
    pub fn respond_webhook(&self, method: &str, args: Args) -> Value {
        webhook_reply(method, args)
    }

    /// Downloads a file into memory.
    ///
    /// The Bot API serves files of at most 20 MB; larger ones fail at
    /// `getFile`.
    #[track_caller]
    pub fn read_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file_path = self.resolve_file(file_id)?;
        self.transport.get(&self.file_url(&file_path))
    }

    /// Downloads a file to `dest`, or to the remote file's base name in the
    /// working directory. Returns the path written.
    #[track_caller]
    pub fn download_file(&self, file_id: &str, dest: Option<&Path>) -> Result<PathBuf> {
        let file_path = self.resolve_file(file_id)?;
        let bytes = self.transport.get(&self.file_url(&file_path))?;

        let dest = match dest {
            Some(dest) => dest.to_path_buf(),
            None => Path::new(&file_path)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(file_id)),
        };
        fs::write(&dest, &bytes)?;

        info!(file_id = %file_id, path = %dest.display(), bytes = bytes.len(), "Downloaded file");
        Ok(dest)
    }

    #[track_caller]
    fn resolve_file(&self, file_id: &str) -> Result<String> {
        let file = self.call("getFile", Args::new().set("file_id", file_id));
        if !file.ok() {
            return Err(ApiError::MethodFailed {
                method: "getFile".to_string(),
                description: file.description().unwrap_or("unknown error").to_string(),
            });
        }
        file.get_str("file_path")
            .map(str::to_string)
            .ok_or_else(|| ApiError::MissingField {
                method: "getFile".to_string(),
                field: "file_path".to_string(),
            })
    }
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("config", &self.config)
            .field("update", &self.update)
            .field("suppressed", &self.suppressed.get())
            .finish_non_exhaustive()
    }
}

/// Leaves a [`Bot::quietly`] scope, also when the closure panics.
struct Suppressed<'a>(&'a Cell<u32>);

impl Drop for Suppressed<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Builds `{...args, "method": method}`, the body that answers a webhook
/// request with a method call. File arguments cannot travel in a JSON reply
/// and are dropped.
pub fn webhook_reply(method: &str, args: Args) -> Value {
    if args.has_files() {
        warn!(method = %method, "File arguments dropped from webhook reply");
    }
    let mut body = args.to_json();
    body.insert("method".to_string(), Value::String(method.to_string()));
    Value::Object(body)
}
