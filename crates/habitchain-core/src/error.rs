//! Core error types for habitchain-core.
//!
//! The streak engine itself is total and never returns an error. Everything
//! here belongs to the layers around it: storage, configuration and the
//! validation that gesture handlers perform before touching a habit.

use std::path::PathBuf;
use thiserror::Error;

use crate::date::CalendarDate;

/// Core error type for habitchain-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised one layer above the engine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A string that is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A day-of-week outside 0..=6
    #[error("Invalid day of week {0}: expected 0 (Sunday) to 6 (Saturday)")]
    InvalidDayOfWeek(u8),

    /// Habit name is empty after trimming
    #[error("Please enter a habit name")]
    EmptyName,

    /// Active-day set is empty
    #[error("Please select at least one day")]
    EmptyActiveDays,

    /// No habit with this id
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    /// Exemptions need at least a day of notice
    #[error("Exemptions can only be set at least 24 hours in advance (requested {date})")]
    ExemptionTooSoon { date: CalendarDate },

    /// Tapping a day that has not happened yet
    #[error("Cannot mark {date}: the date is in the future")]
    FutureDate { date: CalendarDate },

    /// Editing a day outside the habit's schedule
    #[error("Cannot edit {date}: it is not an active day for this habit")]
    InactiveDay { date: CalendarDate },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
