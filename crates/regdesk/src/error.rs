//! Error types for regdesk.
//!
//! This module defines the error types used throughout the regdesk crate.
//! Field validation failures are not represented here: they are
//! reported to the submitter as a [`ValidationReport`](crate::validation::ValidationReport)
//! and only become an [`Error`] when a caller insists on a valid record.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for regdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Relational Store Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database statement failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    // === Tabular Store Errors ===
    /// Failed to write or read a CSV record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open the CSV file.
    #[error("failed to open CSV file at {path}: {source}")]
    CsvOpen {
        /// Path to the CSV file.
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

    // === Registration Errors ===
    /// A registration did not pass field validation.
    #[error("registration rejected: {}", .messages.join(" "))]
    Rejected {
        /// Every failing check's message, in check order.
        messages: Vec<String>,
    },

    /// A faculty selection did not name a known faculty.
    #[error("unknown faculty: {0}")]
    UnknownFaculty(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for regdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from one of the two stores.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::Csv(_)
                | Self::CsvOpen { .. }
                | Self::DirectoryCreate { .. }
        )
    }

    /// Check if this error is a rejected registration.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_rejected_display_joins_messages() {
        let err = Error::Rejected {
            messages: vec![
                "Full Name is required.".to_string(),
                "Invalid email format.".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "registration rejected: Full Name is required. Invalid email format."
        );
        assert!(err.is_rejected());
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("csv_path must not be empty");
        assert!(err.to_string().contains("csv_path must not be empty"));
    }

    #[test]
    fn test_unknown_faculty_display() {
        let err = Error::UnknownFaculty("Faculty of Magic".to_string());
        assert_eq!(err.to_string(), "unknown faculty: Faculty of Magic");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_storage_error());
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
            assert!(err.is_storage_error());
        }
    }

    #[test]
    fn test_csv_open_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::CsvOpen {
            path: PathBuf::from("/root/forbidden.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/forbidden.csv"));
        assert!(msg.contains("access denied"));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_database_open_error_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/db.sqlite"),
                source: sqlite_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/db.sqlite"));
        }
    }
}
