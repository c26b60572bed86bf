//! Reply markup builders.
//!
//! Builds the `reply_markup` payloads attached to outgoing messages:
//!
//! - **inline**: inline keyboards of callback/url/... buttons
//! - **keyboard**: reply keyboards, keyboard removal and force-reply
//! - **markup**: [`ReplyMarkup`], the union of all four, and its JSON form
//!
//! Everything here is a plain value; nothing performs I/O.
//!
//! # Example
//!
//! ```
//! use tgkit_markup::{inline_keyboard, InlineButton};
//!
//! let markup = inline_keyboard(vec![
//!     vec![InlineButton::new("1", "button 1"), InlineButton::new("2", "button 2")],
//!     vec![InlineButton::url("Docs", "https://core.telegram.org/bots/api")],
//! ]);
//!
//! assert!(markup.to_json().contains(r#""url":"https://core.telegram.org/bots/api""#));
//! ```

pub mod inline;
pub mod keyboard;
pub mod markup;

pub use inline::{inline_keyboard, InlineButton, InlineKeyboard, CALLBACK_DATA};
pub use keyboard::{
    force_reply, remove_keyboard, reply_keyboard, ForceReply, KeyboardButton, KeyboardRemove,
    ReplyKeyboard,
};
pub use markup::ReplyMarkup;
