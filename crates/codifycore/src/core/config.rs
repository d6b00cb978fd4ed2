use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

// Configuration values for the bot, read once from the environment.

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: data/codify.db
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "data/codify.db".to_string()));

/// Directory for daily log files
/// Read from LOG_DIR environment variable
/// Default: logs
pub static LOG_DIR: Lazy<String> = Lazy::new(|| env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()));

/// Optional JSON file replacing the built-in course content table
/// Read from CONTENT_PATH environment variable
pub static CONTENT_PATH: Lazy<Option<String>> =
    Lazy::new(|| env::var("CONTENT_PATH").ok().filter(|path| !path.trim().is_empty()));

/// Environment variables holding the bot token, in priority order
pub const BOT_TOKEN_VARS: [&str; 3] = ["BOT_TOKEN", "TELOXIDE_TOKEN", "TELEGRAM_BOT_TOKEN"];

/// Bot token
/// Read from the first non-blank of BOT_TOKEN, TELOXIDE_TOKEN, TELEGRAM_BOT_TOKEN
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| first_token(|name| env::var(name).ok()));

fn first_token(lookup: impl Fn(&str) -> Option<String>) -> String {
    BOT_TOKEN_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_default()
}

/// Custom Bot API server URL (local telegram-bot-api)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Returns the bot token or `ConfigMissing` when it is unset or blank.
pub fn require_bot_token() -> AppResult<String> {
    token_or_missing(&BOT_TOKEN)
}

fn token_or_missing(raw: &str) -> AppResult<String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(AppError::ConfigMissing("BOT_TOKEN"));
    }
    Ok(token.to_string())
}

/// Database pool configuration
pub mod database {
    /// Maximum number of pooled SQLite connections
    pub const POOL_MAX_SIZE: u32 = 10;

    /// Busy timeout for SQLite locks (in seconds)
    pub const BUSY_TIMEOUT_SECS: u64 = 30;
}

/// Log file configuration
pub mod logs {
    /// Daily log files older than this many days are deleted on rotation
    pub const RETENTION_DAYS: i64 = 30;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for Bot API requests (in seconds)
    pub const TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Public links shown in the "About" section
pub mod links {
    /// Project website
    pub const WEBSITE_URL: &str = "https://github.com/codifychat/chatbot";
}
