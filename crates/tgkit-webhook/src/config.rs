//! Webhook server configuration.

use std::path::PathBuf;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8443;

/// Default route receiving updates.
pub const DEFAULT_PATH: &str = "/webhook";

/// Webhook server configuration.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Route receiving updates.
    pub path: String,
    /// Directory for delivery markers. `None` disables the guard.
    pub marker_dir: Option<PathBuf>,
}

impl WebhookConfig {
    /// Creates a configuration with the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Sets the update route. A leading `/` is added when missing.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    /// Enables the delivery guard with markers in `dir`.
    pub fn with_marker_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.marker_dir = Some(dir.into());
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            marker_dir: None,
        }
    }
}
