//! Synchronous gateway to the Telegram Bot API.
//!
//! Every Bot API method is reachable through [`Bot::call`], which posts the
//! arguments to `https://api.telegram.org/bot<token>/<method>` and hands back
//! the decoded response as a [`MethodResult`]. Failed calls never return an
//! error: they come back with `ok == false`, and can optionally be reported to
//! operator chats.
//!
//! - **bot**: the [`Bot`] gateway, reporting and file helpers
//! - **methods**: typed wrappers for commonly used methods
//! - **shortcuts**: `send`, `reply`, `edit`, `doc`, `action`, `mention`, ...
//! - **args**: call arguments ([`Args`]) and file uploads
//! - **result**: [`MethodResult`] and [`MessageRef`]
//! - **transport**: the HTTP seam ([`Transport`], [`HttpTransport`])
//! - **report**: diagnostic messages for failed calls
//! - **config**: [`BotConfig`] and environment loading
//!
//! # Environment Variables
//!
//! Required:
//! - `TGKIT_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional:
//! - `TGKIT_API_URL`: API base URL (default: `https://api.telegram.org`)
//! - `TGKIT_REPORT_CHATS`: Comma-separated chat ids receiving error reports
//! - `TGKIT_REPORT_MODE`: `message` or `log` (default: `message`)
//! - `TGKIT_PARSE_MODE`: Default parse mode (default: `HTML`)
//! - `TGKIT_REPORT_MAX_LEN`: Excerpt length in reports (default: 300)
//! - `TGKIT_HTTP_TIMEOUT_SECS`: Outbound request timeout (default: 30)
//!
//! # Example
//!
//! ```no_run
//! use tgkit_api::{Args, Bot, BotConfig};
//! use tgkit_markup::{inline_keyboard, InlineButton};
//!
//! let bot = Bot::new(BotConfig::new("123:abc"))?;
//! let keyboard = inline_keyboard(vec![vec![InlineButton::url("Docs", "https://core.telegram.org")]]);
//!
//! let sent = bot.call(
//!     "sendMessage",
//!     Args::new()
//!         .set("chat_id", 42)
//!         .set("text", "Hello, world!")
//!         .set("reply_markup", keyboard),
//! );
//! if !sent.ok() {
//!     eprintln!("sendMessage failed: {:?}", sent.description());
//! }
//! # Ok::<(), tgkit_api::ApiError>(())
//! ```

pub mod args;
pub mod bot;
pub mod config;
pub mod error;
pub mod methods;
pub mod report;
pub mod result;
pub mod shortcuts;
pub mod transport;

pub use args::{ArgValue, Args, InputFile};
pub use bot::{webhook_reply, Bot};
pub use config::{mask_token, BotConfig, ReportConfig, ReportMode};
pub use error::{ApiError, Result};
pub use result::{MessageRef, MethodResult};
pub use transport::{HttpTransport, Transport};

// Re-export the crates callers need alongside the gateway
pub use tgkit_markup as markup;
pub use tgkit_update::{FallbackPolicy, Update};
