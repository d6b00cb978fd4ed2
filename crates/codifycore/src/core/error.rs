use thiserror::Error;

/// Centralized error types for the course engine
///
/// Storage faults are converted to safe defaults at the store facade, so in
/// practice only `NotFound`, `NoActiveCourse` and the startup errors reach
/// the router or `main`.
///
/// # Example
///
/// ```no_run
/// use codifycore::core::error::AppError;
///
/// fn describe(err: &AppError) -> String {
///     format!("{}", err)
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Any SQLite failure
    #[error("Storage error: {0}")]
    StorageFault(#[from] rusqlite::Error),

    /// Connection pool could not hand out a connection
    #[error("Storage pool error: {0}")]
    StoragePool(#[from] r2d2::Error),

    /// Course or content is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Navigation requested while no course is open in the session
    #[error("No active course in this session")]
    NoActiveCourse,

    /// Required configuration value is missing
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    /// Content table could not be loaded or is malformed
    #[error("Content error: {0}")]
    Content(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anyhow errors (migrations, startup plumbing)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Content(err.to_string())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_convert() {
        let err = AppError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, AppError::StorageFault(_)));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AppError::ConfigMissing("BOT_TOKEN").to_string(),
            "Missing configuration: BOT_TOKEN"
        );
        assert_eq!(AppError::NotFound("Go".to_string()).to_string(), "Not found: Go");
    }
}
