//! Turns router replies into Bot API calls

use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, KeyboardButton, KeyboardMarkup, MessageId, ParseMode,
    ReplyMarkup,
};

use codifycore::router::{InlineAction, InlineButton, Keyboard, Markup, Reply};

/// Where replies go: the chat, plus the message a callback was attached to.
#[derive(Debug, Clone, Copy)]
pub struct ReplyTarget {
    pub chat_id: ChatId,
    pub origin: Option<MessageId>,
}

impl ReplyTarget {
    pub fn chat(chat_id: ChatId) -> Self {
        Self { chat_id, origin: None }
    }

    pub fn callback(chat_id: ChatId, origin: MessageId) -> Self {
        Self {
            chat_id,
            origin: Some(origin),
        }
    }
}

/// Sends replies in order, stopping at the first failed request.
pub async fn send_replies(bot: &Bot, target: ReplyTarget, replies: Vec<Reply>) -> ResponseResult<()> {
    for reply in replies {
        send_reply(bot, target, reply).await?;
    }
    Ok(())
}

async fn send_reply(bot: &Bot, target: ReplyTarget, reply: Reply) -> ResponseResult<()> {
    match reply {
        Reply::Text { text, markup, keyboard } => {
            send_text(bot, target.chat_id, text, markup, keyboard).await?;
        }
        Reply::Photo(url) => match url.parse() {
            Ok(url) => {
                bot.send_photo(target.chat_id, InputFile::url(url)).await?;
            }
            Err(e) => log::warn!("Skipping course image with invalid URL {}: {}", url, e),
        },
        Reply::Edit { text, markup, keyboard } => match target.origin {
            Some(message_id) => {
                let mut request = bot.edit_message_text(target.chat_id, message_id, text);
                if let Some(mode) = parse_mode(markup) {
                    request = request.parse_mode(mode);
                }
                if let Some(Keyboard::Inline(rows)) = &keyboard {
                    request = request.reply_markup(inline_keyboard(rows));
                }
                request.await?;
            }
            // The callback message is gone; send the content as a new one.
            None => send_text(bot, target.chat_id, text, markup, keyboard).await?,
        },
        Reply::Delete => {
            if let Some(message_id) = target.origin {
                bot.delete_message(target.chat_id, message_id).await?;
            }
        }
    }
    Ok(())
}

async fn send_text(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    markup: Markup,
    keyboard: Option<Keyboard>,
) -> ResponseResult<()> {
    let mut request = bot.send_message(chat_id, text);
    if let Some(mode) = parse_mode(markup) {
        request = request.parse_mode(mode);
    }
    if let Some(keyboard) = &keyboard {
        request = request.reply_markup(reply_markup(keyboard));
    }
    request.await?;
    Ok(())
}

pub fn parse_mode(markup: Markup) -> Option<ParseMode> {
    match markup {
        Markup::Plain => None,
        Markup::Html => Some(ParseMode::Html),
    }
}

pub fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Reply(rows) => ReplyMarkup::Keyboard(reply_keyboard(rows)),
        Keyboard::Inline(rows) => ReplyMarkup::InlineKeyboard(inline_keyboard(rows)),
    }
}

pub fn reply_keyboard(rows: &[Vec<String>]) -> KeyboardMarkup {
    KeyboardMarkup::new(
        rows.iter()
            .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect::<Vec<_>>()),
    )
    .resize_keyboard()
}

pub fn inline_keyboard(rows: &[Vec<InlineButton>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        rows.iter()
            .map(|row| row.iter().filter_map(inline_button).collect::<Vec<_>>()),
    )
}

fn inline_button(button: &InlineButton) -> Option<InlineKeyboardButton> {
    match &button.action {
        InlineAction::Callback(token) => Some(InlineKeyboardButton::callback(button.label.clone(), token.clone())),
        InlineAction::Url(url) => match url.parse() {
            Ok(url) => Some(InlineKeyboardButton::url(button.label.clone(), url)),
            Err(e) => {
                log::warn!("Dropping button {} with invalid URL {}: {}", button.label, url, e);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codifycore::router::{labels, view};
    use pretty_assertions::assert_eq;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_main_menu_keyboard() {
        let Reply::Text {
            keyboard: Some(keyboard),
            ..
        } = view::main_menu()
        else {
            panic!("main menu carries a keyboard");
        };
        let ReplyMarkup::Keyboard(markup) = reply_markup(&keyboard) else {
            panic!("expected a reply keyboard");
        };
        let rows: Vec<Vec<&str>> = markup
            .keyboard
            .iter()
            .map(|row| row.iter().map(|button| button.text.as_str()).collect())
            .collect();
        assert_eq!(rows, vec![vec![labels::COURSES, labels::PROFILE], vec![labels::ABOUT]]);
    }

    #[test]
    fn test_navigation_keyboard_callbacks() {
        let Keyboard::Inline(rows) = view::navigation_keyboard() else {
            panic!("expected an inline keyboard");
        };
        let markup = inline_keyboard(&rows);
        let data: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(data, vec!["prev", "next", "exit_course"]);
    }

    #[test]
    fn test_invalid_url_button_is_dropped() {
        let rows = vec![vec![
            InlineButton::url("site", "not a url"),
            InlineButton::callback("go", "next"),
        ]];
        let markup = inline_keyboard(&rows);
        assert_eq!(markup.inline_keyboard[0].len(), 1);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(Markup::Plain), None);
        assert_eq!(parse_mode(Markup::Html), Some(ParseMode::Html));
    }
}
