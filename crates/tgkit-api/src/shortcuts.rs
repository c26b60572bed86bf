//! Shortcuts for common replies to the current update.
//!
//! Defaults come from the held update (current chat and message) and the
//! configured parse mode. Entries in `params` override the defaults.

use std::path::Path;

use serde_json::Value;

use crate::args::{ArgValue, Args, InputFile};
use crate::bot::Bot;
use crate::report::html_escape;
use crate::result::{MessageRef, MethodResult};

const MEMBER_GONE: [&str; 2] = ["left", "kicked"];
const MEMBER_ADMIN: [&str; 2] = ["administrator", "creator"];

impl Bot {
    fn message_defaults(&self, text: &str) -> Args {
        Args::new()
            .set_opt("chat_id", self.update().chat_id())
            .set("parse_mode", self.config().parse_mode.as_str())
            .set("disable_web_page_preview", true)
            .set("text", text)
    }

    /// Sends `text` to the current chat.
    #[track_caller]
    pub fn send(&self, text: &str, params: Args) -> MethodResult {
        self.send_message(self.message_defaults(text).merge(params))
    }

    /// Sends `text` in reply to the current message.
    #[track_caller]
    pub fn reply(&self, text: &str, params: Args) -> MethodResult {
        let args = self
            .message_defaults(text)
            .set_opt("reply_to_message_id", self.update().message_id())
            .merge(params)
            .set("text", text);
        self.send_message(args)
    }

    /// Replaces the text of the current message.
    #[track_caller]
    pub fn edit(&self, text: &str, params: Args) -> MethodResult {
        let args = self
            .message_defaults(text)
            .set_opt("message_id", self.update().message_id())
            .merge(params)
            .set("text", text);
        self.edit_message_text(args)
    }

    /// Sends a document to the current chat.
    ///
    /// `document` is uploaded when it names a file on disk, otherwise it is
    /// passed on as a file id or URL. An `upload_document` chat action is
    /// sent first.
    #[track_caller]
    pub fn doc(&self, document: &str, params: Args) -> MethodResult {
        let path = Path::new(document);
        let document = if path.is_file() {
            ArgValue::File(InputFile::path(path))
        } else {
            ArgValue::from(document)
        };

        self.quietly(|bot| bot.action("upload_document", Args::new()));

        let args = Args::new()
            .set_opt("chat_id", self.update().chat_id())
            .set("parse_mode", self.config().parse_mode.as_str())
            .set("document", document)
            .merge(params);
        self.send_document(args)
    }

    /// Shows `action` (`typing`, `upload_document`, ...) in the current chat.
    #[track_caller]
    pub fn action(&self, action: &str, params: Args) -> MethodResult {
        let args = Args::new()
            .set_opt("chat_id", self.update().chat_id())
            .set("action", action)
            .merge(params);
        self.send_chat_action(args)
    }

    /// Mentions a user: `@username` when set, otherwise an inline link in
    /// HTML or Markdown. Falls back to the bare id when the user is unknown.
    pub fn mention(&self, user_id: i64, parse_mode: &str) -> String {
        let info = self.chat(Some(user_id));
        let info = info.as_ref();
        let first_name = info
            .and_then(|i| i.get("first_name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty());
        let Some(first_name) = first_name else {
            return user_id.to_string();
        };

        match info.and_then(|i| i.get("username")).and_then(Value::as_str) {
            Some(username) => format!("@{}", username),
            None if parse_mode.eq_ignore_ascii_case("html") => {
                format!("<a href='tg://user?id={}'>{}</a>", user_id, html_escape(first_name))
            }
            None => format!("[{}](tg://user?id={})", first_name, user_id),
        }
    }

    /// `getChat` for `chat_id`, or the current chat. `None` when the call
    /// fails.
    pub fn chat(&self, chat_id: Option<i64>) -> Option<Value> {
        let chat_id = chat_id.or_else(|| self.update().chat_id())?;
        let chat = self.quietly(|bot| bot.get_chat(Args::new().set("chat_id", chat_id)));
        chat.result().cloned()
    }

    /// Whether `user_id` is currently a member of `chat_id`.
    pub fn in_chat(&self, user_id: i64, chat_id: impl Into<ArgValue>) -> bool {
        self.member_status(user_id, chat_id.into())
            .is_some_and(|status| !MEMBER_GONE.contains(&status.as_str()))
    }

    /// Whether a user administers a chat. Defaults to the sender and the
    /// current chat.
    pub fn is_admin(&self, user_id: Option<i64>, chat_id: Option<i64>) -> bool {
        let (Some(user_id), Some(chat_id)) = (
            user_id.or_else(|| self.update().user_id()),
            chat_id.or_else(|| self.update().chat_id()),
        ) else {
            return false;
        };
        self.member_status(user_id, ArgValue::from(chat_id))
            .is_some_and(|status| MEMBER_ADMIN.contains(&status.as_str()))
    }

    fn member_status(&self, user_id: i64, chat_id: ArgValue) -> Option<String> {
        let member = self.quietly(|bot| {
            bot.get_chat_member(Args::new().set("chat_id", chat_id).set("user_id", user_id))
        });
        if !member.ok() {
            return None;
        }
        member.get_str("status").map(str::to_string)
    }

    /// Replaces the text of a sent message. `msg` tracks the new text on
    /// success.
    #[track_caller]
    pub fn edit_ref(&self, msg: &mut MessageRef, text: &str, params: Args) -> MethodResult {
        let args = ref_defaults(msg)
            .set("disable_web_page_preview", true)
            .merge(params)
            .set("text", text);
        let result = self.edit_message_text(args);
        track_text(msg, &result);
        result
    }

    /// Appends `text` to a sent message.
    #[track_caller]
    pub fn append_ref(&self, msg: &mut MessageRef, text: &str, params: Args) -> MethodResult {
        let full = format!("{}{}", msg.text.as_deref().unwrap_or_default(), text);
        let args = ref_defaults(msg)
            .set("disable_web_page_preview", true)
            .merge(params)
            .set("text", full);
        let result = self.edit_message_text(args);
        track_text(msg, &result);
        result
    }

    /// Replies to a sent message.
    #[track_caller]
    pub fn reply_ref(&self, msg: &MessageRef, text: &str, params: Args) -> MethodResult {
        let args = Args::new()
            .set("chat_id", msg.chat_id)
            .set("disable_web_page_preview", true)
            .set("reply_to_message_id", msg.message_id)
            .merge(params)
            .set("text", text);
        self.send_message(args)
    }

    #[track_caller]
    pub fn delete_ref(&self, msg: &MessageRef, params: Args) -> MethodResult {
        self.delete_message(ref_defaults(msg).merge(params))
    }

    /// Forwards a sent message to each of `chat_ids`, one result per chat.
    #[track_caller]
    pub fn forward_ref<I, C>(&self, msg: &MessageRef, chat_ids: I, params: Args) -> Vec<MethodResult>
    where
        I: IntoIterator<Item = C>,
        C: Into<ArgValue>,
    {
        let base = Args::new()
            .set("from_chat_id", msg.chat_id)
            .set("message_id", msg.message_id)
            .merge(params);
        let mut results = Vec::new();
        for chat_id in chat_ids {
            results.push(self.forward_message(base.clone().set("chat_id", chat_id)));
        }
        results
    }
}

fn ref_defaults(msg: &MessageRef) -> Args {
    Args::new()
        .set("chat_id", msg.chat_id)
        .set("message_id", msg.message_id)
}

fn track_text(msg: &mut MessageRef, result: &MethodResult) {
    if let Some(edited) = result.message_ref() {
        msg.text = edited.text;
    }
}
