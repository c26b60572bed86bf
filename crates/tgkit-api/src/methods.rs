//! Typed wrappers for frequently used Bot API methods.
//!
//! Each wrapper is [`Bot::call`] with a fixed method name. Methods without a
//! wrapper stay reachable through `call`.

use crate::args::Args;
use crate::bot::Bot;
use crate::result::MethodResult;

macro_rules! api_methods {
    ($($(#[$meta:meta])* $name:ident => $method:literal;)*) => {
        impl Bot {
            $(
                $(#[$meta])*
                #[doc = concat!("\n\nCalls `", $method, "`.")]
                #[track_caller]
                pub fn $name(&self, args: Args) -> MethodResult {
                    self.call($method, args)
                }
            )*
        }

        /// Method names with a typed wrapper.
        pub const WRAPPED_METHODS: &[&str] = &[$($method),*];
    };
}

api_methods! {
    /// Sends a text message.
    send_message => "sendMessage";
    /// Forwards a message between chats.
    forward_message => "forwardMessage";
    /// Edits the text of a sent message.
    edit_message_text => "editMessageText";
    delete_message => "deleteMessage";
    /// Sends a general file, uploaded or referenced by file id or URL.
    send_document => "sendDocument";
    /// Shows a status such as `typing` in the chat.
    send_chat_action => "sendChatAction";
    answer_callback_query => "answerCallbackQuery";
    answer_inline_query => "answerInlineQuery";
    /// Basic information about the bot.
    get_me => "getMe";
    get_chat => "getChat";
    get_chat_member => "getChatMember";
    /// Resolves a file id to a downloadable path.
    get_file => "getFile";
    set_webhook => "setWebhook";
    delete_webhook => "deleteWebhook";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_methods_are_camel_case() {
        assert_eq!(WRAPPED_METHODS.len(), 14);
        assert!(WRAPPED_METHODS
            .iter()
            .all(|m| m.chars().next().is_some_and(|c| c.is_ascii_lowercase()) && !m.contains('_')));
    }
}
