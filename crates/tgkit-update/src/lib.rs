//! Update accessors for Telegram webhook payloads.
//!
//! An incoming update is a JSON object with an `update_id` and exactly one
//! "kind" field (`message`, `callback_query`, `inline_query`, ...). This
//! crate wraps that object and exposes short lookups over it:
//!
//! - **update**: the [`Update`] wrapper, `get_value` and the named accessors
//! - **summary**: a condensed view of an update for diagnostic messages
//! - **error**: errors raised while decoding an inbound body
//!
//! # Example
//!
//! ```
//! use tgkit_update::Update;
//!
//! let update = Update::from_json(
//!     r#"{"update_id": 7, "message": {"message_id": 1, "text": "/start",
//!        "chat": {"id": 42, "type": "private"}}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(update.update_type(), Some("message"));
//! assert_eq!(update.text(), Some("/start"));
//! assert_eq!(update.chat_id(), Some(42));
//! ```

pub mod error;
pub mod summary;
pub mod update;

pub use error::{Result, UpdateError};
pub use summary::{ChatSummary, UpdateSummary};
pub use update::{FallbackPolicy, Update};
