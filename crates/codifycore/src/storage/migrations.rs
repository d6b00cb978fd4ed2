use anyhow::{Context, Result};
use rusqlite::Connection;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use crate::core::config;

mod embedded {
    use refinery::embed_migrations;

    embed_migrations!("./migrations");
}

static MIGRATION_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies the embedded schema migrations.
///
/// Safe to run on every start: refinery records applied versions and the
/// schema itself only uses `IF NOT EXISTS`.
///
/// Returns true when this run applied the initial schema (V1).
pub fn run_migrations(conn: &mut Connection) -> Result<bool> {
    // Two pools in one process (tests, `init-db` followed by `run`) must not
    // interleave migration runs.
    let mutex = MIGRATION_LOCK.get_or_init(|| Mutex::new(()));
    let _guard = match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("Migration lock was poisoned, recovering...");
            poisoned.into_inner()
        }
    };

    conn.busy_timeout(Duration::from_secs(config::database::BUSY_TIMEOUT_SECS))
        .context("set SQLite busy timeout")?;

    let report = embedded::migrations::runner()
        .run(conn)
        .context("apply migrations")?;

    let mut schema_created = false;
    for migration in report.applied_migrations() {
        log::info!("Applied migration V{}__{}", migration.version(), migration.name());
        schema_created |= migration.version() == 1;
    }
    Ok(schema_created)
}
