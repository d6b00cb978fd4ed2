//! Telegram integration: bot setup, update handlers, and reply rendering

pub mod bot;
pub mod handlers;
pub mod render;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError, SessionDialogue};
