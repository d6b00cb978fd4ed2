//! Outbound views: replies, keyboards, and the menus built from them

use super::event::NavAction;
use super::labels;
use crate::content::Section;
use crate::core::config;

/// How reply text should be parsed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Plain,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineAction {
    Callback(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub action: InlineAction,
}

impl InlineButton {
    pub fn callback(label: &str, token: &str) -> Self {
        Self {
            label: label.to_string(),
            action: InlineAction::Callback(token.to_string()),
        }
    }

    pub fn url(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            action: InlineAction::Url(url.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Rows of button labels shown under the input field
    Reply(Vec<Vec<String>>),
    /// Rows of buttons attached to the message
    Inline(Vec<Vec<InlineButton>>),
}

impl Keyboard {
    fn reply_rows(rows: &[&[&str]]) -> Self {
        Keyboard::Reply(
            rows.iter()
                .map(|row| row.iter().map(|label| label.to_string()).collect())
                .collect(),
        )
    }

    /// One row per course plus the "back to courses" row.
    pub fn course_list(courses: &[String]) -> Self {
        let mut rows: Vec<Vec<String>> = courses.iter().map(|name| vec![name.clone()]).collect();
        rows.push(vec![labels::BACK_TO_COURSES.to_string()]);
        Keyboard::Reply(rows)
    }
}

/// One outbound action for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text {
        text: String,
        markup: Markup,
        keyboard: Option<Keyboard>,
    },
    Photo(String),
    /// Replace the text (and keyboard) of the message the callback came from
    Edit {
        text: String,
        markup: Markup,
        keyboard: Option<Keyboard>,
    },
    /// Delete the message the callback came from
    Delete,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            markup: Markup::Plain,
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply::Text {
            text: text.into(),
            markup: Markup::Plain,
            keyboard: Some(keyboard),
        }
    }

    pub fn edit_plain(text: impl Into<String>) -> Self {
        Reply::Edit {
            text: text.into(),
            markup: Markup::Plain,
            keyboard: None,
        }
    }

    /// Text carried by a text or edit reply.
    pub fn body(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } | Reply::Edit { text, .. } => Some(text),
            Reply::Photo(_) | Reply::Delete => None,
        }
    }
}

pub fn main_menu() -> Reply {
    Reply::with_keyboard(
        labels::MAIN_MENU_PROMPT,
        Keyboard::reply_rows(&[&[labels::COURSES, labels::PROFILE], &[labels::ABOUT]]),
    )
}

pub fn courses_menu() -> Reply {
    Reply::with_keyboard(
        labels::COURSES_MENU_PROMPT,
        Keyboard::reply_rows(&[
            &[labels::CHOOSE_COURSE, labels::CONTINUE_LEARNING],
            &[labels::BACK_TO_MAIN],
        ]),
    )
}

pub fn start_now_offer() -> Reply {
    Reply::with_keyboard(
        labels::START_NOW_PROMPT,
        Keyboard::reply_rows(&[&[labels::START_NOW], &[labels::BACK_TO_COURSES]]),
    )
}

pub fn about() -> Reply {
    Reply::with_keyboard(
        labels::ABOUT_TEXT,
        Keyboard::Inline(vec![vec![InlineButton::url(labels::WEBSITE, config::links::WEBSITE_URL)]]),
    )
}

pub fn profile(platform_id: i64, username: Option<&str>) -> Reply {
    let mut text = format!("ID: {}\n", platform_id);
    if let Some(username) = username {
        text.push_str(&format!("Username: @{}\n", username));
    }
    Reply::text(text)
}

pub fn navigation_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![
            InlineButton::callback(labels::NAV_PREV, NavAction::Prev.token()),
            InlineButton::callback(labels::NAV_NEXT, NavAction::Next.token()),
        ],
        vec![InlineButton::callback(labels::NAV_EXIT, NavAction::Exit.token())],
    ])
}

/// HTML body of a section with its media link and a position footer.
pub fn section_body(section: &Section, position: usize, len: usize) -> String {
    let mut body = section.text.clone();
    if let Some(media) = &section.media {
        body.push_str(&format!("\n\n<a href=\"{}\">{}</a>", media, labels::SECTION_MEDIA));
    }
    body.push_str(&format!("\n\n<i>{}/{}</i>", position + 1, len));
    body
}

/// A section as a fresh message (used when entering a course).
pub fn section_message(section: &Section, position: usize, len: usize) -> Reply {
    Reply::Text {
        text: section_body(section, position, len),
        markup: Markup::Html,
        keyboard: Some(navigation_keyboard()),
    }
}

/// A section replacing the previous one in place (used when paging).
pub fn section_edit(section: &Section, position: usize, len: usize) -> Reply {
    Reply::Edit {
        text: section_body(section, position, len),
        markup: Markup::Html,
        keyboard: Some(navigation_keyboard()),
    }
}
