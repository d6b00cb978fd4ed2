//! Database pool, schema, seed data, and the course/subscription stores

pub mod catalog;
pub mod db;
pub mod migrations;
pub mod seed;
pub mod store;
pub mod subscriptions;

// Re-exports for convenience
pub use db::{create_pool, get_connection, initialize_database, DbConnection, DbPool};
pub use store::CourseStore;
pub use subscriptions::SubscribeOutcome;
