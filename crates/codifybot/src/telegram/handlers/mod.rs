//! Telegram bot handler tree configuration
//!
//! The dispatcher schema is built from plain functions so integration tests
//! can construct the same handler tree as production code.

mod schema;
mod types;

pub use schema::schema;
pub use types::{sender_of, HandlerDeps, HandlerError, SessionDialogue, SessionStorage};
