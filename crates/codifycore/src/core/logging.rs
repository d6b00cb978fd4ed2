//! Logging initialization and the leveled event handle
//!
//! This module provides:
//! - Logger initialization (colored console + daily file)
//! - `EventLog`, the handle passed to the router for info/warn/error/success events

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use simplelog::*;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::config;

/// Builds the path of today's log file: `<dir>/<YYYY-MM-DD>.log`.
pub fn daily_log_path(log_dir: &Path, today: NaiveDate) -> PathBuf {
    log_dir.join(format!("{}.log", today.format("%Y-%m-%d")))
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Deletes daily log files dated more than `retention_days` before `today`.
///
/// Files whose name is not `<YYYY-MM-DD>.log` are left alone. Returns the
/// number of files removed.
pub fn prune_old_logs(log_dir: &Path, today: NaiveDate, retention_days: i64) -> io::Result<usize> {
    let cutoff = today - Duration::days(retention_days);
    let mut removed = 0;
    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("log") {
            continue;
        }
        let dated = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok());
        if matches!(dated, Some(date) if date < cutoff) && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Log sink that switches to a new `<YYYY-MM-DD>.log` file when the local
/// date changes and prunes files past the retention window.
pub struct DailyFileWriter {
    dir: PathBuf,
    date: NaiveDate,
    file: File,
    retention_days: i64,
}

impl DailyFileWriter {
    pub fn open(dir: &Path, today: NaiveDate, retention_days: i64) -> io::Result<Self> {
        let file = open_append(&daily_log_path(dir, today))?;
        // Errors here cannot be logged: this is the logger.
        let _ = prune_old_logs(dir, today, retention_days);
        Ok(Self {
            dir: dir.to_path_buf(),
            date: today,
            file,
            retention_days,
        })
    }

    /// Path of the file currently written to.
    pub fn path(&self) -> PathBuf {
        daily_log_path(&self.dir, self.date)
    }

    /// Moves to the file for `today` if the date changed.
    pub fn roll_to(&mut self, today: NaiveDate) -> io::Result<()> {
        if today == self.date {
            return Ok(());
        }
        self.file.flush()?;
        self.file = open_append(&daily_log_path(&self.dir, today))?;
        self.date = today;
        let _ = prune_old_logs(&self.dir, today, self.retention_days);
        Ok(())
    }
}

impl Write for DailyFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.roll_to(Local::now().date_naive())?;
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Initialize logger for both console and file output
///
/// Creates `log_dir` when needed and appends to the file for the current day,
/// so restarts on the same day keep the earlier entries. The file rolls over
/// at local midnight; files older than `config::logs::RETENTION_DAYS` are
/// deleted.
///
/// # Arguments
/// * `log_dir` - Directory holding the daily log files
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the log file in use at startup
/// * `Err(anyhow::Error)` - Failed to create the file or a logger is already installed
pub fn init_logger(log_dir: &str) -> Result<PathBuf> {
    let dir = Path::new(log_dir);
    fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;

    let today = Local::now().date_naive();
    let log_file = DailyFileWriter::open(dir, today, config::logs::RETENTION_DAYS)
        .with_context(|| format!("open log file {}", daily_log_path(dir, today).display()))?;
    let path = log_file.path();

    let config = Config::default();

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, config, log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(path)
}

/// Leveled event sink handed to the router.
///
/// `log` has no SUCCESS level, so `success` is an `info` record tagged with a
/// check mark. The `scope` becomes the log target, which keeps router events
/// filterable from storage events.
#[derive(Debug, Clone, Copy)]
pub struct EventLog {
    scope: &'static str,
}

impl EventLog {
    pub const fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        log::info!(target: self.scope, "{}", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        log::warn!(target: self.scope, "{}", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        log::error!(target: self.scope, "{}", message.as_ref());
    }

    pub fn success(&self, message: impl AsRef<str>) {
        log::info!(target: self.scope, "✅ {}", message.as_ref());
    }
}
