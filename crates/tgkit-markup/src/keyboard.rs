//! Reply keyboards and keyboard directives.

use serde::Serialize;

use crate::markup::ReplyMarkup;

/// One key of a reply keyboard.
///
/// Plain labels serialize as bare strings; request buttons as objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KeyboardButton {
    Text(String),
    Request {
        text: String,
        request_contact: bool,
        request_location: bool,
    },
}

impl KeyboardButton {
    /// A button that shares the user's phone number.
    pub fn contact(text: impl Into<String>) -> Self {
        KeyboardButton::Request {
            text: text.into(),
            request_contact: true,
            request_location: false,
        }
    }

    /// A button that shares the user's location.
    pub fn location(text: impl Into<String>) -> Self {
        KeyboardButton::Request {
            text: text.into(),
            request_contact: false,
            request_location: true,
        }
    }
}

impl From<&str> for KeyboardButton {
    fn from(text: &str) -> Self {
        KeyboardButton::Text(text.to_string())
    }
}

impl From<String> for KeyboardButton {
    fn from(text: String) -> Self {
        KeyboardButton::Text(text)
    }
}

/// `ReplyKeyboardMarkup`, built fluently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyKeyboard {
    keyboard: Vec<Vec<KeyboardButton>>,
    resize_keyboard: bool,
    one_time_keyboard: bool,
    selective: bool,
}

impl ReplyKeyboard {
    /// Creates a keyboard; not resized, persistent and selective.
    pub fn new<R, B>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = B>,
        B: Into<KeyboardButton>,
    {
        Self {
            keyboard: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            resize_keyboard: false,
            one_time_keyboard: false,
            selective: true,
        }
    }

    /// Lets the client shrink the keyboard to fit its buttons.
    pub fn resize(mut self, resize: bool) -> Self {
        self.resize_keyboard = resize;
        self
    }

    /// Hides the keyboard once a button is used.
    pub fn one_time(mut self, one_time: bool) -> Self {
        self.one_time_keyboard = one_time;
        self
    }

    /// Shows the keyboard only to mentioned/replied users.
    pub fn selective(mut self, selective: bool) -> Self {
        self.selective = selective;
        self
    }

    pub fn rows(&self) -> &[Vec<KeyboardButton>] {
        &self.keyboard
    }

    pub fn to_json(&self) -> String {
        ReplyMarkup::from(self.clone()).to_json()
    }
}

/// Shorthand for [`ReplyKeyboard::new`].
pub fn reply_keyboard<R, B>(rows: impl IntoIterator<Item = R>) -> ReplyKeyboard
where
    R: IntoIterator<Item = B>,
    B: Into<KeyboardButton>,
{
    ReplyKeyboard::new(rows)
}

/// `ReplyKeyboardRemove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyboardRemove {
    remove_keyboard: bool,
    selective: bool,
}

/// `ForceReply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForceReply {
    force_reply: bool,
    selective: bool,
}

pub fn remove_keyboard(selective: bool) -> KeyboardRemove {
    KeyboardRemove {
        remove_keyboard: true,
        selective,
    }
}

pub fn force_reply(selective: bool) -> ForceReply {
    ForceReply {
        force_reply: true,
        selective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_keyboard_defaults() {
        let kb = reply_keyboard(vec![vec!["Yes", "No"]]);
        assert_eq!(
            ReplyMarkup::from(kb).to_json(),
            r#"{"keyboard":[["Yes","No"]],"resize_keyboard":false,"one_time_keyboard":false,"selective":true}"#
        );
    }

    #[test]
    fn test_reply_keyboard_flags_and_request_buttons() {
        let kb = ReplyKeyboard::new(vec![vec![
            KeyboardButton::contact("Phone"),
            KeyboardButton::location("Where"),
        ]])
        .resize(true)
        .one_time(true)
        .selective(false);

        assert_eq!(
            kb.to_json(),
            concat!(
                r#"{"keyboard":[[{"text":"Phone","request_contact":true,"request_location":false},"#,
                r#"{"text":"Where","request_contact":false,"request_location":true}]],"#,
                r#""resize_keyboard":true,"one_time_keyboard":true,"selective":false}"#
            )
        );
    }

    #[test]
    fn test_remove_keyboard() {
        assert_eq!(
            ReplyMarkup::from(remove_keyboard(false)).to_json(),
            r#"{"remove_keyboard":true,"selective":false}"#
        );
    }

    #[test]
    fn test_force_reply() {
        assert_eq!(
            ReplyMarkup::from(force_reply(true)).to_json(),
            r#"{"force_reply":true,"selective":true}"#
        );
    }
}
