//! Codify core - course catalog, subscriptions, and lesson paging for the
//! Codify learning bot
//!
//! This crate holds everything that does not talk to Telegram: storage,
//! bundled course content, per-session navigation, and the event router that
//! turns inbound events into outbound replies.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, and logging
//! - `storage`: SQLite pool, migrations, seed data, and the course store
//! - `content`: Section text for each course
//! - `navigation`: Per-session reading cursor
//! - `router`: Event classification, dispatch, and reply views

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod content;
pub mod core;
pub mod navigation;
pub mod router;
pub mod storage;

// Re-export commonly used types for convenience
pub use content::{ContentRepository, Section};
pub use crate::core::{config, AppError, AppResult, EventLog};
pub use navigation::{NavigationCursor, Session, Step};
pub use router::{BotCommand, InboundEvent, Reply, Router, Sender};
pub use storage::{create_pool, get_connection, initialize_database, CourseStore, DbConnection, DbPool};
