//! Integration tests for reply shortcuts and message follow-ups.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::{bot_with, reporting_config, MockTransport};
use serde_json::json;
use tgkit_api::{Args, BotConfig, MessageRef};

fn chat_member(status: &'static str) -> MockTransport {
    MockTransport::new(move |method, _| match method {
        "getChatMember" => Ok(json!({"ok": true, "result": {"status": status, "user": {"id": 7}}}).to_string()),
        _ => Ok(common::bad_request()),
    })
}

#[test]
fn test_send_defaults() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    assert!(bot.send("hello", Args::new()).ok());

    let requests = mock.requests();
    let sent = &requests[0];
    assert_eq!(sent.method, "sendMessage");
    assert_eq!(sent.json("chat_id"), Some(json!(42)));
    assert_eq!(sent.json("parse_mode"), Some(json!("HTML")));
    assert_eq!(sent.json("disable_web_page_preview"), Some(json!(true)));
    assert_eq!(sent.json("text"), Some(json!("hello")));
}

#[test]
fn test_send_params_override() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    bot.send("hello", Args::new().set("parse_mode", "MarkdownV2").set("chat_id", 5));

    let requests = mock.requests();
    let sent = &requests[0];
    assert_eq!(sent.json("parse_mode"), Some(json!("MarkdownV2")));
    assert_eq!(sent.json("chat_id"), Some(json!(5)));
}

#[test]
fn test_reply_text_wins() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    bot.reply("answer", Args::new().set("text", "ignored"));

    let requests = mock.requests();
    let sent = &requests[0];
    assert_eq!(sent.json("reply_to_message_id"), Some(json!(10)));
    assert_eq!(sent.json("text"), Some(json!("answer")));
}

#[test]
fn test_edit_current_message() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    bot.edit("updated", Args::new());

    let requests = mock.requests();
    let sent = &requests[0];
    assert_eq!(sent.method, "editMessageText");
    assert_eq!(sent.json("message_id"), Some(json!(10)));
    assert_eq!(sent.json("chat_id"), Some(json!(42)));
}

#[test]
fn test_action_default() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    bot.action("typing", Args::new());

    let requests = mock.requests();
    let sent = &requests[0];
    assert_eq!(sent.method, "sendChatAction");
    assert_eq!(sent.json("action"), Some(json!("typing")));
}

#[test]
fn test_doc_uploads_existing_file() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"report").unwrap();

    bot.doc(file.path().to_str().unwrap(), Args::new().set("caption", "weekly"));

    let requests = mock.requests();
    assert_eq!(requests[0].method, "sendChatAction");
    assert_eq!(requests[0].json("action"), Some(json!("upload_document")));
    assert_eq!(requests[1].method, "sendDocument");
    assert!(requests[1].args.has_files());
    assert_eq!(requests[1].json("caption"), Some(json!("weekly")));
}

#[test]
fn test_doc_forwards_file_id() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    bot.doc("BQACAgQAAxkBAAI", Args::new());

    let requests = mock.requests();
    let sent = &requests[1];
    assert!(!sent.args.has_files());
    assert_eq!(sent.json("document"), Some(json!("BQACAgQAAxkBAAI")));
}

#[test]
fn test_doc_action_failure_not_reported() {
    let mock = Arc::new(MockTransport::failing());
    let bot = bot_with(reporting_config(), &mock);

    bot.doc("BQACAgQAAxkBAAI", Args::new());

    // sendChatAction is quiet; only sendDocument is reported
    assert_eq!(
        mock.methods(),
        vec!["sendChatAction", "sendDocument", "sendMessage"]
    );
}

#[test]
fn test_mention_variants() {
    let mock = Arc::new(MockTransport::new(|_, _| {
        Ok(json!({"ok": true, "result": {"id": 2, "first_name": "Di"}}).to_string())
    }));
    let bot = bot_with(reporting_config(), &mock);

    assert_eq!(bot.mention(2, "html"), "<a href='tg://user?id=2'>Di</a>");
    assert_eq!(bot.mention(2, "Markdown"), "[Di](tg://user?id=2)");
}

#[test]
fn test_mention_escapes_name_in_html() {
    let mock = Arc::new(MockTransport::new(|_, _| {
        Ok(json!({"ok": true, "result": {"id": 3, "first_name": "<Bo & Co>"}}).to_string())
    }));
    let bot = bot_with(reporting_config(), &mock);

    assert_eq!(
        bot.mention(3, "HTML"),
        "<a href='tg://user?id=3'>&lt;Bo &amp; Co&gt;</a>"
    );
}

#[test]
fn test_mention_username() {
    let mock = Arc::new(MockTransport::new(|_, _| {
        Ok(json!({"ok": true, "result": {"id": 1, "first_name": "Cy", "username": "cy"}}).to_string())
    }));
    let bot = bot_with(reporting_config(), &mock);

    assert_eq!(bot.mention(1, "html"), "@cy");
}

#[test]
fn test_mention_unknown_user() {
    let mock = Arc::new(MockTransport::failing());
    let bot = bot_with(reporting_config(), &mock);

    assert_eq!(bot.mention(404, "html"), "404");
    // getChat failures are not reported
    assert_eq!(mock.methods(), vec!["getChat"]);
}

#[test]
fn test_chat_defaults_to_current() {
    let mock = Arc::new(MockTransport::new(|_, _| {
        Ok(json!({"ok": true, "result": {"id": 42, "type": "private"}}).to_string())
    }));
    let bot = bot_with(reporting_config(), &mock);

    let chat = bot.chat(None).unwrap();

    assert_eq!(chat["id"], json!(42));
    assert_eq!(mock.requests()[0].json("chat_id"), Some(json!(42)));
}

#[test]
fn test_in_chat() {
    let member = Arc::new(chat_member("member"));
    assert!(bot_with(reporting_config(), &member).in_chat(7, -100));

    let left = Arc::new(chat_member("left"));
    assert!(!bot_with(reporting_config(), &left).in_chat(7, "@club"));

    let failing = Arc::new(MockTransport::failing());
    assert!(!bot_with(reporting_config(), &failing).in_chat(7, -100));
    assert_eq!(failing.methods(), vec!["getChatMember"]);
}

#[test]
fn test_is_admin() {
    let creator = Arc::new(chat_member("creator"));
    let bot = bot_with(reporting_config(), &creator);
    assert!(bot.is_admin(None, None));
    let requests = creator.requests();
    let sent = &requests[0];
    assert_eq!(sent.json("user_id"), Some(json!(7)));
    assert_eq!(sent.json("chat_id"), Some(json!(42)));

    let member = Arc::new(chat_member("member"));
    assert!(!bot_with(reporting_config(), &member).is_admin(Some(8), Some(-100)));
}

fn sent_message() -> MessageRef {
    MessageRef {
        chat_id: 42,
        message_id: 100,
        text: Some("Progress: ".to_string()),
    }
}

#[test]
fn test_edit_ref_tracks_text() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);
    let mut msg = sent_message();

    bot.edit_ref(&mut msg, "Done", Args::new());

    let requests = mock.requests();
    let sent = &requests[0];
    assert_eq!(sent.method, "editMessageText");
    assert_eq!(sent.json("message_id"), Some(json!(100)));
    assert_eq!(msg.text.as_deref(), Some("Done"));
}

#[test]
fn test_append_ref() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);
    let mut msg = sent_message();

    bot.append_ref(&mut msg, "50%", Args::new());
    bot.append_ref(&mut msg, ", 100%", Args::new());

    assert_eq!(mock.requests()[1].json("text"), Some(json!("Progress: 50%, 100%")));
    assert_eq!(msg.text.as_deref(), Some("Progress: 50%, 100%"));
}

#[test]
fn test_append_ref_keeps_text_on_failure() {
    let mock = Arc::new(MockTransport::failing());
    let bot = bot_with(BotConfig::new("1:a"), &mock);
    let mut msg = sent_message();

    assert!(!bot.append_ref(&mut msg, "50%", Args::new()).ok());
    assert_eq!(msg.text.as_deref(), Some("Progress: "));
}

#[test]
fn test_reply_and_delete_ref() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);
    let msg = sent_message();

    bot.reply_ref(&msg, "see above", Args::new());
    bot.delete_ref(&msg, Args::new());

    let requests = mock.requests();
    assert_eq!(requests[0].json("reply_to_message_id"), Some(json!(100)));
    assert_eq!(requests[1].method, "deleteMessage");
    assert_eq!(requests[1].json("chat_id"), Some(json!(42)));
}

#[test]
fn test_forward_ref_to_many_chats() {
    let mock = Arc::new(MockTransport::echo());
    let bot = bot_with(reporting_config(), &mock);

    let results = bot.forward_ref(&sent_message(), [1_i64, 2, 3], Args::new());

    assert_eq!(results.len(), 3);
    let requests = mock.requests();
    assert!(requests.iter().all(|r| r.method == "forwardMessage"));
    assert_eq!(requests[2].json("chat_id"), Some(json!(3)));
    assert_eq!(requests[2].json("from_chat_id"), Some(json!(42)));
}
