//! Initial course rows for a freshly created database

use rusqlite::{Connection, Result};

const SEED_COURSES_SQL: &str = include_str!("../../data/seed_courses.sql");

pub fn count_courses(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))
}

/// Loads the seed course rows and returns how many were inserted.
///
/// Uses `INSERT OR IGNORE`, so rows that already exist are left untouched.
pub fn seed_courses(conn: &Connection) -> Result<usize> {
    let before = count_courses(conn)?;
    conn.execute_batch(SEED_COURSES_SQL)?;
    let after = count_courses(conn)?;
    Ok(usize::try_from(after - before).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::migrations::run_migrations;

    #[test]
    fn test_seed_is_insert_if_absent() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        let first = seed_courses(&conn).unwrap();
        assert!(first >= 4);
        assert_eq!(seed_courses(&conn).unwrap(), 0);
        assert_eq!(count_courses(&conn).unwrap(), first as i64);
    }
}
