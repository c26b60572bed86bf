//! Diagnostic messages for failed API calls.

use std::panic::Location;

use tgkit_update::{ChatSummary, Update, UpdateSummary};

use crate::config::{BotConfig, ReportMode};
use crate::result::MethodResult;

/// Longest text Telegram accepts in one message.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Builds the report for a failed call of `method` made at `caller`.
///
/// The first paragraph is the raw response, the second names the method and
/// call site. With `show_data`, a third paragraph describes the update being
/// handled. HTML markup is used only when reports are sent as messages with
/// the HTML parse mode.
///
/// Long responses are shortened before escaping so the report never exceeds
/// [`MAX_MESSAGE_LEN`] and never ends inside a tag or entity.
pub fn render(
    config: &BotConfig,
    method: &str,
    caller: &Location<'_>,
    result: &MethodResult,
    update: &Update,
) -> String {
    let tail = format!(
        "\n\nError thrown by the method {}, called at {}:{}",
        method,
        caller.file(),
        caller.line()
    );
    compose(config, result.raw(), &tail, update)
}

/// Builds the report for a panic raised by an update handler at
/// `file:line`.
pub fn render_panic(
    config: &BotConfig,
    message: &str,
    file: &str,
    line: u32,
    update: &Update,
) -> String {
    let tail = format!(" in {} on line {}", file, line);
    compose(config, message, &tail, update)
}

/// Whether reports are rendered with HTML markup.
pub fn uses_html(config: &BotConfig) -> bool {
    config.report.mode == ReportMode::Message && config.parse_mode.eq_ignore_ascii_case("html")
}

/// `{excerpt}{tail}`, escaped when needed, followed by the data line.
///
/// The data line and the tail are kept whole; only the excerpt is shortened.
fn compose(config: &BotConfig, excerpt: &str, tail: &str, update: &Update) -> String {
    let html = uses_html(config);

    let data_line = config
        .report
        .show_data
        .then(|| {
            let summary = update.summary(config.report.max_len);
            if html {
                html_data_line(&summary)
            } else {
                plain_data_line(&summary)
            }
        })
        .map(|line| format!("\n\n{}", line))
        .filter(|line| line.chars().count() < MAX_MESSAGE_LEN);

    let budget = MAX_MESSAGE_LEN - data_line.as_ref().map_or(0, |line| line.chars().count());
    let tail = fit(tail, budget, html);
    let mut text = fit(excerpt, budget - tail.chars().count(), html);
    text.push_str(&tail);
    if let Some(line) = data_line {
        text.push_str(&line);
    }
    text
}

/// Escapes `text` when `html` is set, keeping at most `budget` characters of
/// output. Cut text ends with an ellipsis; entities are never split.
fn fit(text: &str, budget: usize, html: bool) -> String {
    let full: usize = text.chars().map(|c| escaped_len(c, html)).sum();
    if full <= budget {
        return if html { html_escape(text) } else { text.to_string() };
    }

    let limit = budget.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let len = escaped_len(c, html);
        if used + len > limit {
            break;
        }
        match escape_char(c, html) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
        used += len;
    }
    if budget > 0 {
        out.push('\u{2026}');
    }
    out
}

fn escape_char(c: char, html: bool) -> Option<&'static str> {
    if !html {
        return None;
    }
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

fn escaped_len(c: char, html: bool) -> usize {
    escape_char(c, html).map_or(1, str::len)
}

fn html_data_line(summary: &UpdateSummary) -> String {
    let mut line = format!("\"{}\", ", html_escape(&summary.text));
    if let Some(id) = summary.sender_id {
        line.push_str(&format!(
            "sent by {}, ",
            user_link(id, summary.sender_name.as_deref().unwrap_or_default())
        ));
    }
    if let Some(chat) = &summary.chat {
        line.push_str(&format!(
            "in {} ({}).",
            display_id(chat.id),
            html_chat_mention(chat, summary)
        ));
    }
    line.push_str(&format!(" Update type: '{}'.", kind_name(summary)));
    line
}

fn plain_data_line(summary: &UpdateSummary) -> String {
    let mut line = format!("\"{}\", ", summary.text);
    if let Some(id) = summary.sender_id {
        line.push_str(&format!(
            "sent by {} ({}), ",
            id,
            summary.sender_name.as_deref().unwrap_or_default()
        ));
    }
    if let Some(chat) = &summary.chat {
        let mention = chat
            .username
            .as_deref()
            .map(|u| format!("@{}", u))
            .unwrap_or_default();
        line.push_str(&format!("in {} ({}).", display_id(chat.id), mention));
    }
    line.push_str(&format!(" Update type: '{}'.", kind_name(summary)));
    line
}

/// Private chats mention the user; other chats link to the message or show
/// the title.
fn html_chat_mention(chat: &ChatSummary, summary: &UpdateSummary) -> String {
    match (&chat.username, chat.is_private()) {
        (Some(username), true) => format!("@{}", username),
        (None, true) => match summary.sender_id {
            Some(id) => user_link(id, summary.sender_name.as_deref().unwrap_or_default()),
            None => String::new(),
        },
        (Some(username), false) => format!(
            "<a href='t.me/{}/{}'>@{}</a>",
            username,
            summary.message_id.map(|id| id.to_string()).unwrap_or_default(),
            username
        ),
        (None, false) => format!(
            "<i>{}</i>",
            html_escape(chat.title.as_deref().unwrap_or_default())
        ),
    }
}

fn user_link(id: i64, name: &str) -> String {
    format!("<a href='tg://user?id={}'>{}</a>", id, html_escape(name))
}

fn display_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn kind_name(summary: &UpdateSummary) -> &str {
    summary.kind.as_deref().unwrap_or_default()
}
