use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::core::config;
use crate::core::error::AppResult;
use crate::storage::{migrations, seed};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Every connection enables foreign keys; the pool holds up to
/// `config::database::POOL_MAX_SIZE` connections.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
///
/// # Example
///
/// ```no_run
/// use codifycore::storage::db;
///
/// let pool = db::create_pool("data/codify.db")?;
/// # Ok::<(), r2d2::Error>(())
/// ```
pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    Pool::builder().max_size(config::database::POOL_MAX_SIZE).build(manager)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Outcome of [`initialize_database`].
pub struct InitializedDatabase {
    pub pool: DbPool,
    /// True when the database file did not exist before this call.
    pub created: bool,
    /// Number of course rows inserted by seeding (0 when seeding was skipped).
    pub seeded_courses: usize,
}

/// Opens (or creates) the database, applies migrations and seeds a new file.
///
/// Seeding runs when the real file at `database_path` was absent, when this
/// call applied the initial schema, or when the catalog is still empty (a
/// first start that died before seeding). A populated existing database is
/// never re-seeded.
pub fn initialize_database(database_path: &str) -> AppResult<InitializedDatabase> {
    let path = Path::new(database_path);
    let created = !path.exists();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = create_pool(database_path)?;
    let mut conn = get_connection(&pool)?;
    let schema_created = migrations::run_migrations(&mut conn)?;
    let needs_seed = created || schema_created || seed::count_courses(&conn)? == 0;

    let seeded_courses = if needs_seed {
        let inserted = seed::seed_courses(&conn)?;
        log::info!("✅ Database at {} seeded with {} course(s)", database_path, inserted);
        inserted
    } else {
        log::info!("✅ Database already exists at {}", database_path);
        0
    };
    drop(conn);

    Ok(InitializedDatabase {
        pool,
        created,
        seeded_courses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_count(pool: &DbPool) -> i64 {
        let conn = get_connection(pool).unwrap();
        conn.query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_initialize_creates_and_seeds_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("codify.db");

        let db = initialize_database(path.to_str().unwrap()).unwrap();
        assert!(db.created);
        assert!(db.seeded_courses > 0);
        assert!(path.exists());
        assert_eq!(course_count(&db.pool), db.seeded_courses as i64);
    }

    #[test]
    fn test_initialize_skips_seed_for_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codify.db");
        let path = path.to_str().unwrap();

        let first = initialize_database(path).unwrap();
        {
            let conn = get_connection(&first.pool).unwrap();
            conn.execute("DELETE FROM courses WHERE name = 'SQL'", []).unwrap();
        }
        let remaining = course_count(&first.pool);
        drop(first);

        let second = initialize_database(path).unwrap();
        assert!(!second.created);
        assert_eq!(second.seeded_courses, 0);
        assert_eq!(course_count(&second.pool), remaining);
    }

    #[test]
    fn test_initialize_seeds_preexisting_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let path = path.to_str().unwrap();
        // A start that crashed right after SQLite created the file
        drop(rusqlite::Connection::open(path).unwrap());

        let db = initialize_database(path).unwrap();
        assert!(!db.created);
        assert!(db.seeded_courses > 0);
        assert_eq!(course_count(&db.pool), db.seeded_courses as i64);
    }

    #[test]
    fn test_initialize_seeds_migrated_but_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unseeded.db");
        let path = path.to_str().unwrap();
        {
            let mut conn = rusqlite::Connection::open(path).unwrap();
            migrations::run_migrations(&mut conn).unwrap();
        }

        let db = initialize_database(path).unwrap();
        assert!(!db.created);
        assert!(db.seeded_courses > 0);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fk.db");
        let db = initialize_database(path.to_str().unwrap()).unwrap();
        let conn = get_connection(&db.pool).unwrap();

        let enabled: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(enabled, 1);

        let orphan = conn.execute("INSERT INTO user_courses (user_id, course_id) VALUES (999, 999)", []);
        assert!(orphan.is_err());
    }
}
