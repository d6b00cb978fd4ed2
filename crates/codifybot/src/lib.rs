//! Codify bot - Telegram front end for the Codify course library
//!
//! # Module Structure
//!
//! - `cli`: Command line arguments
//! - `telegram`: Bot construction, dispatcher schema, and reply rendering

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, HandlerError};
