//! User ↔ course subscription links

use rusqlite::{params, Connection, Result};

use super::catalog::{get_course, get_user};

/// Outcome of [`subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// A new link row was written
    Created,
    /// The user was already subscribed
    AlreadySubscribed,
    /// No user with this Telegram id
    UnknownUser,
    /// No course with this name
    UnknownCourse,
}

/// Subscribes a user to a course by Telegram id and course name.
///
/// Both sides are resolved first; a missing side is reported instead of
/// relying on a foreign-key failure. The insert itself is `INSERT OR IGNORE`
/// against `UNIQUE(user_id, course_id)`, so concurrent callers cannot create
/// a duplicate row.
pub fn subscribe(conn: &Connection, telegram_id: i64, course_name: &str) -> Result<SubscribeOutcome> {
    let Some(user) = get_user(conn, telegram_id)? else {
        return Ok(SubscribeOutcome::UnknownUser);
    };
    let Some(course) = get_course(conn, course_name)? else {
        return Ok(SubscribeOutcome::UnknownCourse);
    };

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO user_courses (user_id, course_id) VALUES (?1, ?2)",
        params![user.id, course.id],
    )?;

    Ok(if inserted > 0 {
        SubscribeOutcome::Created
    } else {
        SubscribeOutcome::AlreadySubscribed
    })
}

/// Names of the courses a user is subscribed to, oldest subscription first.
pub fn list_subscriptions(conn: &Connection, telegram_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT c.name
         FROM user_courses uc
         JOIN courses c ON uc.course_id = c.id
         JOIN users u ON uc.user_id = u.id
         WHERE u.telegram_id = ?1
         ORDER BY uc.rowid",
    )?;
    let rows = stmt.query_map(params![telegram_id], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Number of link rows for one (user, course) pair.
pub fn count_links(conn: &Connection, telegram_id: i64, course_name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*)
         FROM user_courses uc
         JOIN courses c ON uc.course_id = c.id
         JOIN users u ON uc.user_id = u.id
         WHERE u.telegram_id = ?1 AND c.name = ?2",
        params![telegram_id, course_name],
        |row| row.get(0),
    )
}
