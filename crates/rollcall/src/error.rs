//! Error types for rollcall.
//!
//! This module defines all error types used throughout the rollcall crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// A required field was empty after trimming.
    #[error("please enter the {field}")]
    Validation {
        /// Human-readable name of the missing field.
        field: &'static str,
    },

    /// Attendance for this roll number has already been recorded on this date.
    #[error("attendance already marked on {date} for roll: {roll_number}")]
    Duplicate {
        /// The roll number that was already recorded.
        roll_number: String,
        /// The date of the existing record.
        date: NaiveDate,
    },

    // === Storage Errors ===
    /// Appending a record to the attendance file failed.
    #[error("error writing to {path}: {source}")]
    Append {
        /// Path to the attendance file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the attendance file failed.
    #[error("error reading {path}: {source}")]
    Read {
        /// Path to the attendance file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the named field.
    #[must_use]
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Create a duplicate-record error.
    #[must_use]
    pub fn duplicate(roll_number: impl Into<String>, date: NaiveDate) -> Self {
        Self::Duplicate {
            roll_number: roll_number.into(),
            date,
        }
    }

    /// Check if this error rejected a duplicate (roll number, date) pair.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this error rejected empty input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
