//! Handler types and dependencies

use std::sync::Arc;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::types::{User, UserId};

use codifycore::{Router, Sender, Session};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Per-chat session storage; lost on restart.
pub type SessionStorage = InMemStorage<Session>;

pub type SessionDialogue = Dialogue<Session, SessionStorage>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub router: Arc<Router>,
}

impl HandlerDeps {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

/// Builds the router-facing sender from a Telegram user.
pub fn sender_of(user: Option<&User>, chat_id: ChatId) -> Sender {
    sender_from_parts(user.map(|u| u.id), user.and_then(|u| u.username.as_deref()), chat_id)
}

/// Telegram ids fit in `i64`; a missing or out-of-range id falls back to the chat id.
fn sender_from_parts(user_id: Option<UserId>, username: Option<&str>, chat_id: ChatId) -> Sender {
    let platform_id = user_id.and_then(|id| i64::try_from(id.0).ok()).unwrap_or(chat_id.0);
    Sender::new(platform_id, username.map(str::to_string))
}
