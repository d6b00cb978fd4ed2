//! Pool-backed facade over the catalog and subscription tables
//!
//! Every method converts storage faults into a safe default (empty list,
//! `None`, no-op) after logging them, so callers never see a `StorageFault`.

use rusqlite::Connection;
use std::sync::Arc;

use super::catalog::{self, User};
use super::db::{get_connection, DbPool};
use super::subscriptions::{self, SubscribeOutcome};
use crate::core::error::AppError;
use crate::core::logging::EventLog;

#[derive(Clone)]
pub struct CourseStore {
    pool: Arc<DbPool>,
    events: EventLog,
}

impl CourseStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            events: EventLog::new("codify::storage"),
        }
    }

    pub fn pool(&self) -> &Arc<DbPool> {
        &self.pool
    }

    /// Runs `f` on a pooled connection, logging any fault under `operation`.
    fn with_conn<T>(&self, operation: &str, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Option<T> {
        let result = get_connection(&self.pool)
            .map_err(AppError::from)
            .and_then(|conn| f(&*conn).map_err(AppError::from));
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.events.error(format!("{} failed: {}", operation, e));
                None
            }
        }
    }

    /// Active course names in storage order; empty on failure.
    pub fn list_active_courses(&self) -> Vec<String> {
        self.with_conn("list_active_courses", catalog::list_active_courses)
            .unwrap_or_default()
    }

    /// Course image reference; `None` when absent or on failure.
    pub fn get_course_image(&self, name: &str) -> Option<String> {
        self.with_conn("get_course_image", |conn| catalog::get_course_image(conn, name))
            .flatten()
    }

    pub fn get_user(&self, telegram_id: i64) -> Option<User> {
        self.with_conn("get_user", |conn| catalog::get_user(conn, telegram_id))
            .flatten()
    }

    /// Insert-if-absent; silently does nothing for known users.
    pub fn register_user(&self, telegram_id: i64, username: Option<&str>) {
        if let Some(true) = self.with_conn("register_user", |conn| {
            catalog::create_user_if_absent(conn, telegram_id, username)
        }) {
            self.events.info(format!(
                "Registered user {} ({})",
                username.unwrap_or("-"),
                telegram_id
            ));
        }
    }

    /// Subscribes the user; `None` only when storage failed.
    pub fn subscribe(&self, telegram_id: i64, course_name: &str) -> Option<SubscribeOutcome> {
        let outcome = self.with_conn("subscribe", |conn| {
            subscriptions::subscribe(conn, telegram_id, course_name)
        })?;
        match outcome {
            SubscribeOutcome::Created => self
                .events
                .success(format!("User {} subscribed to course {}", telegram_id, course_name)),
            SubscribeOutcome::AlreadySubscribed => {}
            SubscribeOutcome::UnknownUser => self
                .events
                .warn(format!("Subscribe skipped: unknown user {}", telegram_id)),
            SubscribeOutcome::UnknownCourse => self
                .events
                .warn(format!("Subscribe skipped: unknown course {}", course_name)),
        }
        Some(outcome)
    }

    /// Subscribed course names; empty on failure.
    pub fn list_subscriptions(&self, telegram_id: i64) -> Vec<String> {
        self.with_conn("list_subscriptions", |conn| {
            subscriptions::list_subscriptions(conn, telegram_id)
        })
        .unwrap_or_default()
    }
}
