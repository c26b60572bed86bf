//! Inline keyboards.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::markup::ReplyMarkup;

/// Default button action.
pub const CALLBACK_DATA: &str = "callback_data";

/// A button shown under a message.
///
/// Serializes as `{"text": ..., "<kind>": value}`, so `kind` may be any
/// action the platform knows (`callback_data`, `url`,
/// `switch_inline_query`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    text: String,
    value: String,
    kind: String,
}

impl InlineButton {
    /// A callback button.
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            kind: CALLBACK_DATA.to_string(),
        }
    }

    /// A button opening a URL.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, url).with_kind("url")
    }

    /// Changes the action type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl From<(&str, &str)> for InlineButton {
    fn from((text, value): (&str, &str)) -> Self {
        Self::new(text, value)
    }
}

impl From<(&str, &str, &str)> for InlineButton {
    fn from((text, value, kind): (&str, &str, &str)) -> Self {
        Self::new(text, value).with_kind(kind)
    }
}

impl Serialize for InlineButton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("text", &self.text)?;
        map.serialize_entry(&self.kind, &self.value)?;
        map.end()
    }
}

/// `InlineKeyboardMarkup`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct InlineKeyboard {
    inline_keyboard: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn rows(&self) -> &[Vec<InlineButton>] {
        &self.inline_keyboard
    }

    /// Appends a row of buttons.
    pub fn push_row<B: Into<InlineButton>>(&mut self, row: impl IntoIterator<Item = B>) {
        self.inline_keyboard
            .push(row.into_iter().map(Into::into).collect());
    }

    pub fn to_json(&self) -> String {
        ReplyMarkup::from(self.clone()).to_json()
    }
}

/// Builds an inline keyboard from rows of buttons.
pub fn inline_keyboard<R, B>(rows: impl IntoIterator<Item = R>) -> InlineKeyboard
where
    R: IntoIterator<Item = B>,
    B: Into<InlineButton>,
{
    InlineKeyboard {
        inline_keyboard: rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_keyboard_json() {
        let markup = inline_keyboard(vec![
            vec![InlineButton::new("A", "x")],
            vec![InlineButton::from(("B", "y", "url"))],
        ]);
        assert_eq!(
            markup.to_json(),
            r#"{"inline_keyboard":[[{"text":"A","callback_data":"x"}],[{"text":"B","url":"y"}]]}"#
        );
    }

    #[test]
    fn test_tuple_rows() {
        let markup = inline_keyboard(vec![vec![("1", "button 1"), ("2", "button 2")]]);
        assert_eq!(markup.rows().len(), 1);
        assert_eq!(markup.rows()[0][1].value(), "button 2");
        assert_eq!(markup.rows()[0][1].kind(), CALLBACK_DATA);
    }

    #[test]
    fn test_push_row() {
        let mut markup = inline_keyboard(Vec::<Vec<InlineButton>>::new());
        markup.push_row([InlineButton::url("Me", "t.me/some_bot")]);
        assert_eq!(
            markup.to_json(),
            r#"{"inline_keyboard":[[{"text":"Me","url":"t.me/some_bot"}]]}"#
        );
    }

    #[test]
    fn test_slashes_and_unicode_unescaped() {
        let markup = inline_keyboard(vec![vec![InlineButton::url("Olá", "https://a.b/c")]]);
        let json = markup.to_json();
        assert!(json.contains("https://a.b/c"));
        assert!(json.contains("Olá"));
    }
}
