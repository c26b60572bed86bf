//! Demo bot served when no other handler is configured.
//!
//! Commands:
//! - `/start`: greeting with an inline keyboard of three buttons
//! - `/ping`: answered inside the webhook response
//! - `/keyboard`: reply keyboard asking for contact or location
//! - `/hide`: removes the reply keyboard
//!
//! Presses of the inline buttons are answered with a callback notification.

use serde_json::Value;
use tgkit_api::report::html_escape;
use tgkit_api::{Args, Bot};
use tgkit_markup::{inline_keyboard, remove_keyboard, InlineButton, KeyboardButton, ReplyKeyboard};
use tracing::{debug, info};

use crate::handler::UpdateHandler;

/// Callback data carried by the inline buttons of `/start`.
pub const BUTTONS: [&str; 3] = ["button 1", "button 2", "button 3"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoBot;

impl UpdateHandler for DemoBot {
    fn handle(&self, bot: &Bot) -> Option<Value> {
        let update = bot.update();
        debug!(update_id = ?update.update_id(), kind = ?update.update_type(), "Demo bot handling update");

        if update.update_type() == Some("callback_query") {
            answer_button(bot);
            return None;
        }

        match update.text()? {
            "/start" => {
                start(bot);
                None
            }
            "/ping" => Some(bot.respond_webhook(
                "sendMessage",
                Args::new()
                    .set_opt("chat_id", update.chat_id())
                    .set("text", "pong"),
            )),
            "/keyboard" => {
                let keyboard = ReplyKeyboard::new(vec![
                    vec![KeyboardButton::contact("Share contact")],
                    vec![KeyboardButton::location("Share location")],
                    vec![KeyboardButton::from("/hide")],
                ])
                .resize(true)
                .one_time(true);
                bot.reply("Choose an option", Args::new().set("reply_markup", keyboard));
                None
            }
            "/hide" => {
                bot.reply("Keyboard removed", Args::new().set("reply_markup", remove_keyboard(true)));
                None
            }
            _ => None,
        }
    }
}

fn start(bot: &Bot) {
    let mut keyboard = inline_keyboard(vec![vec![
        InlineButton::new("1", BUTTONS[0]),
        InlineButton::new("2", BUTTONS[1]),
        InlineButton::new("3", BUTTONS[2]),
    ]]);

    let me = bot.quietly(|bot| bot.get_me(Args::new()));
    if let Some(username) = me.get_str("username") {
        keyboard.push_row([InlineButton::url("Me", format!("https://t.me/{}", username))]);
    }

    let name = bot.update().name().unwrap_or_default();
    let text = format!("Hello, {}!", html_escape(&name));
    bot.send(&text, Args::new().set("reply_markup", keyboard));

    info!(chat_id = ?bot.update().chat_id(), user_id = ?bot.update().user_id(), "User started bot");
}

fn answer_button(bot: &Bot) {
    let Some(query) = bot.update().callback_query() else {
        return;
    };
    let id = query.get("id").and_then(Value::as_str).unwrap_or_default();
    let data = query.get("data").and_then(Value::as_str).unwrap_or_default();
    let args = Args::new().set("callback_query_id", id);

    match data {
        "button 1" => {
            bot.answer_callback_query(args.set("text", "Hey! This is the first button!"));
        }
        "button 2" => {
            bot.answer_callback_query(
                args.set("text", "Hey! This is the second button!")
                    .set("show_alert", true),
            );
        }
        "button 3" => {
            bot.answer_callback_query(args.set("text", "Hey! This is the third button!"));
            bot.send("Button 3 pressed!", Args::new());
        }
        _ => {
            bot.answer_callback_query(args);
        }
    }
}
