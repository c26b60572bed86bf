//! Arguments of a single API call.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tgkit_markup::{ForceReply, InlineKeyboard, KeyboardRemove, ReplyKeyboard, ReplyMarkup};

/// A file attached to a call. Its presence switches the request to multipart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFile {
    /// A file read from disk at send time.
    Path(PathBuf),
    /// In-memory contents with the file name shown to recipients.
    Memory { file_name: String, bytes: Vec<u8> },
}

impl InputFile {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        InputFile::Path(path.into())
    }

    pub fn memory(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        InputFile::Memory {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// The name sent in the multipart part.
    pub fn file_name(&self) -> Option<String> {
        match self {
            InputFile::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            InputFile::Memory { file_name, .. } => Some(file_name.clone()),
        }
    }
}

/// One argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Any JSON value. Form encoding sends strings as-is and everything
    /// else as compact JSON.
    Json(Value),
    File(InputFile),
}

impl ArgValue {
    /// The text sent for this value in a form body, `None` for files and nulls.
    pub fn form_text(&self) -> Option<String> {
        match self {
            ArgValue::Json(Value::Null) | ArgValue::File(_) => None,
            ArgValue::Json(Value::String(s)) => Some(s.clone()),
            ArgValue::Json(other) => Some(other.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ArgValue::Json(value) => Some(value),
            ArgValue::File(_) => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, ArgValue::File(_))
    }
}

macro_rules! json_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ArgValue {
                fn from(value: $ty) -> Self {
                    ArgValue::Json(Value::from(value))
                }
            }
        )*
    };
}

json_arg_from!(&str, String, i32, i64, u32, u64, f64, bool, Value);

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        ArgValue::Json(Value::String(value.clone()))
    }
}

impl From<InputFile> for ArgValue {
    fn from(file: InputFile) -> Self {
        ArgValue::File(file)
    }
}

impl From<&Path> for ArgValue {
    fn from(path: &Path) -> Self {
        ArgValue::File(InputFile::path(path))
    }
}

impl From<ReplyMarkup> for ArgValue {
    fn from(markup: ReplyMarkup) -> Self {
        ArgValue::Json(markup.to_value())
    }
}

macro_rules! markup_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ArgValue {
                fn from(markup: $ty) -> Self {
                    ArgValue::from(ReplyMarkup::from(markup))
                }
            }
        )*
    };
}

markup_arg_from!(InlineKeyboard, ReplyKeyboard, KeyboardRemove, ForceReply);

/// Ordered argument map of one call. Setting an existing key replaces it in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    entries: Vec<(String, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Args::insert`].
    pub fn set(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Sets `key` only when `value` is present.
    pub fn set_opt<V: Into<ArgValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The value of `key` as a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_json()?.as_str()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Applies `overrides` on top of `self`.
    pub fn merge(mut self, overrides: Args) -> Self {
        for (key, value) in overrides.entries {
            self.insert(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the call must be sent as multipart.
    pub fn has_files(&self) -> bool {
        self.entries.iter().any(|(_, v)| v.is_file())
    }

    /// Text fields for a form-encoded body.
    pub fn form_fields(&self) -> Vec<(&str, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.form_text().map(|text| (k.as_str(), text)))
            .collect()
    }

    /// The arguments as a JSON object. Files are skipped.
    pub fn to_json(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_json().map(|json| (k.clone(), json.clone())))
            .collect()
    }
}

impl From<Value> for Args {
    /// Object entries become arguments; any other value yields no arguments.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (k, ArgValue::Json(v)))
                    .collect(),
            },
            _ => Self::default(),
        }
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}
