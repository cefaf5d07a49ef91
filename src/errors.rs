//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

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
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid duty status: {0}")]
    InvalidStatus(String),

    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(String),

    // ---------------------------
    // HOS log errors
    // ---------------------------
    #[error("No active duty log for driver '{0}': the driver was never onboarded")]
    NoActiveLog(String),

    #[error("Stale write for driver '{driver_id}': {reason}. Re-fetch the log and retry")]
    StaleWrite { driver_id: String, reason: String },

    #[error("Log store temporarily unavailable: {0}")]
    TransientFetch(String),

    #[error("Corrupt duty log: {0}")]
    CorruptLog(String),

    #[error("Driver '{0}' is already registered")]
    DriverExists(String),

    #[error("Unknown driver '{0}'")]
    UnknownDriver(String),

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
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures a caller may retry with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::TransientFetch(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
