//! Course and user records

use rusqlite::{params, Connection, OptionalExtension, Result};

/// A user known to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Row id in `users`
    pub id: i64,
    /// Telegram user id
    pub telegram_id: i64,
    /// Telegram username, if the user has one
    pub username: Option<String>,
}

/// A course row from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub image_url: Option<String>,
}

/// Names of active courses in storage order.
pub fn list_active_courses(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM courses WHERE active = 1 ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Looks a course up by its unique name.
pub fn get_course(conn: &Connection, name: &str) -> Result<Option<Course>> {
    conn.query_row(
        "SELECT id, name, active, image_url FROM courses WHERE name = ?1",
        params![name],
        |row| {
            Ok(Course {
                id: row.get(0)?,
                name: row.get(1)?,
                active: row.get(2)?,
                image_url: row.get(3)?,
            })
        },
    )
    .optional()
}

/// Image reference of a course; `None` when the course or its image is absent.
pub fn get_course_image(conn: &Connection, name: &str) -> Result<Option<String>> {
    let image: Option<Option<String>> = conn
        .query_row(
            "SELECT image_url FROM courses WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(image.flatten().filter(|url| !url.trim().is_empty()))
}

/// Inserts the user unless one with the same Telegram id exists.
///
/// Returns `true` when a new row was created.
pub fn create_user_if_absent(conn: &Connection, telegram_id: i64, username: Option<&str>) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO users (telegram_id, username) VALUES (?1, ?2)",
        params![telegram_id, username],
    )?;
    Ok(inserted > 0)
}

/// Looks a user up by Telegram id.
pub fn get_user(conn: &Connection, telegram_id: i64) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, telegram_id, username FROM users WHERE telegram_id = ?1",
        params![telegram_id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                telegram_id: row.get(1)?,
                username: row.get(2)?,
            })
        },
    )
    .optional()
}
