//! Unified application error type.
//! All modules (chat, core, db, cli, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Codecs
    // ---------------------------
    #[error("Pattern compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors (CLI input only, chat text never errors)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Directory errors
    // ---------------------------
    #[error("Person not found: {0}")]
    PersonNotFound(i64),

    #[error("Leave not found: {0}")]
    LeaveNotFound(i64),

    #[error("Holiday already exists for date {0}")]
    HolidayExists(String),

    #[error("Invalid leave transition: {0}")]
    InvalidLeaveTransition(String),

    // ---------------------------
    // Chat sources
    // ---------------------------
    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    #[error("Transient connection failure: {0}")]
    TransientConnection(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures worth retrying (network hiccups, busy mailbox).
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::TransientConnection(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
