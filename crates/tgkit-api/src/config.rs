//! Gateway configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tgkit_update::FallbackPolicy;

use crate::error::{ApiError, Result};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TGKIT_BOT_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "TGKIT_API_URL";

/// Environment variable listing operator chats for error reports.
pub const REPORT_CHATS_ENV: &str = "TGKIT_REPORT_CHATS";

/// Environment variable selecting the report mode.
pub const REPORT_MODE_ENV: &str = "TGKIT_REPORT_MODE";

/// Environment variable for the default parse mode.
pub const PARSE_MODE_ENV: &str = "TGKIT_PARSE_MODE";

/// Environment variable for the report excerpt length.
pub const REPORT_MAX_LEN_ENV: &str = "TGKIT_REPORT_MAX_LEN";

/// Environment variable for the outbound request timeout.
pub const HTTP_TIMEOUT_ENV: &str = "TGKIT_HTTP_TIMEOUT_SECS";

/// Default Bot API server.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default parse mode for shortcuts and reports.
pub const DEFAULT_PARSE_MODE: &str = "HTML";

/// Default excerpt length for update text in reports.
pub const DEFAULT_REPORT_MAX_LEN: usize = 300;

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where diagnostics for failed calls go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Send a message to every operator chat.
    #[default]
    Message,
    /// Emit an error event through `tracing`.
    Log,
}

impl FromStr for ReportMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" => Ok(ReportMode::Message),
            "log" | "notice" => Ok(ReportMode::Log),
            _ => Err(ApiError::InvalidConfig {
                key: REPORT_MODE_ENV.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Error reporting settings.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Chat ids (or `@channel` names) receiving reports. Empty disables reporting.
    pub chats: Vec<String>,
    pub mode: ReportMode,
    /// Include the triggering update's text, sender and chat.
    pub show_data: bool,
    /// Skip reports for calls made inside `Bot::quietly`.
    pub obey_suppression: bool,
    /// Maximum characters of update text quoted in a report.
    pub max_len: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chats: Vec::new(),
            mode: ReportMode::default(),
            show_data: true,
            obey_suppression: true,
            max_len: DEFAULT_REPORT_MAX_LEN,
        }
    }
}

impl ReportConfig {
    /// Whether any operator chat is configured.
    pub fn enabled(&self) -> bool {
        !self.chats.is_empty()
    }
}

/// Everything a [`Bot`](crate::Bot) needs besides its transport.
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    /// Base URL, without trailing slash.
    pub api_url: String,
    pub parse_mode: String,
    pub timeout: Duration,
    pub report: ReportConfig,
    pub fallback: FallbackPolicy,
}

impl BotConfig {
    /// Creates a config with defaults and reporting disabled.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            parse_mode: DEFAULT_PARSE_MODE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            report: ReportConfig::default(),
            fallback: FallbackPolicy::default(),
        }
    }

    /// Enables reporting to the given chats.
    pub fn with_report_chats<I, S>(mut self, chats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.report.chats = chats.into_iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = parse_mode.into();
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Loads the config from `TGKIT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get(TOKEN_ENV).ok_or(ApiError::NoToken)?;
        let mut config = Self::new(token.trim());

        if let Some(url) = get(API_URL_ENV) {
            config = config.with_api_url(url.trim());
        }
        if let Some(parse_mode) = get(PARSE_MODE_ENV) {
            config.parse_mode = parse_mode.trim().to_string();
        }
        if let Some(chats) = get(REPORT_CHATS_ENV) {
            config.report.chats = chats
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(mode) = get(REPORT_MODE_ENV) {
            config.report.mode = mode.parse()?;
        }
        if let Some(max_len) = get(REPORT_MAX_LEN_ENV) {
            config.report.max_len = parse_number(REPORT_MAX_LEN_ENV, &max_len)?;
        }
        if let Some(secs) = get(HTTP_TIMEOUT_ENV) {
            config.timeout = Duration::from_secs(parse_number(HTTP_TIMEOUT_ENV, &secs)?);
        }

        Ok(config)
    }

    /// The token with its secret part hidden, for logs.
    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &self.masked_token())
            .field("api_url", &self.api_url)
            .field("parse_mode", &self.parse_mode)
            .field("timeout", &self.timeout)
            .field("report", &self.report)
            .field("fallback", &self.fallback)
            .finish()
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ApiError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Masks a bot token for logging: the numeric bot id stays visible, the
/// secret after `:` is reduced to its last 4 characters.
pub fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, secret)) if secret.chars().count() > 8 => {
            let tail: String = secret
                .chars()
                .skip(secret.chars().count() - 4)
                .collect();
            format!("{}:***{}", id, tail)
        }
        Some((id, _)) => format!("{}:***", id),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let result = BotConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ApiError::NoToken)));
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = BotConfig::from_lookup(lookup(&[(TOKEN_ENV, "1:abc")])).unwrap();
        assert_eq!(config.token, "1:abc");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.parse_mode, DEFAULT_PARSE_MODE);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!config.report.enabled());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = BotConfig::from_lookup(lookup(&[
            (TOKEN_ENV, "1:abc"),
            (API_URL_ENV, "http://localhost:8081/"),
            (REPORT_CHATS_ENV, "276145711, @ops ,"),
            (REPORT_MODE_ENV, "log"),
            (REPORT_MAX_LEN_ENV, "50"),
            (HTTP_TIMEOUT_ENV, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8081");
        assert_eq!(config.report.chats, vec!["276145711", "@ops"]);
        assert_eq!(config.report.mode, ReportMode::Log);
        assert_eq!(config.report.max_len, 50);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_invalid_number() {
        let result = BotConfig::from_lookup(lookup(&[
            (TOKEN_ENV, "1:abc"),
            (HTTP_TIMEOUT_ENV, "soon"),
        ]));
        assert!(matches!(result, Err(ApiError::InvalidConfig { .. })));
    }

    #[test]
    fn test_report_mode_parse() {
        assert_eq!("Message".parse::<ReportMode>().unwrap(), ReportMode::Message);
        assert_eq!("notice".parse::<ReportMode>().unwrap(), ReportMode::Log);
        assert!("pager".parse::<ReportMode>().is_err());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("123456:ABCDEFGHIJKLMNOP"), "123456:***MNOP");
        assert_eq!(mask_token("123456:short"), "123456:***");
        assert_eq!(mask_token("garbage"), "***");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = BotConfig::new("123456:ABCDEFGHIJKLMNOP");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ABCDEFGHIJKL"));
        assert!(debug.contains("123456:***MNOP"));
    }
}
