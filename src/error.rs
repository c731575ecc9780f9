//! Error types for room-roster
//!
//! This module defines the error hierarchy for the whole pipeline.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Per-record validation failures are not errors: the loader drops those
//! records with a diagnostic and keeps going. Everything in this enum aborts
//! the run.

use std::io;
use std::path::Path;
use thiserror::Error;

/// The main error type for room-roster
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // File Access Errors
    // ============================================================================
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Invalid JSON format in file {path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("{kind} record missing required key: {field}")]
    MalformedRecord { kind: String, field: String },

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    // ============================================================================
    // Selection Errors
    // ============================================================================
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Unknown validation strategy: {kind}")]
    UnknownRecordKind { kind: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a malformed input error for a file
    pub fn malformed_input(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed_record(kind: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedRecord {
            kind: kind.into(),
            field: field.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Classify an I/O error raised while touching `path`.
    ///
    /// Missing files and denied access get their own variants so callers can
    /// tell them apart from generic device faults.
    pub fn from_io(err: io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io(err),
        }
    }

    /// Whether the error came from the data rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedInput { .. } | Error::MalformedRecord { .. }
        )
    }
}

/// Result type alias for room-roster
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("bad flag");
        assert_eq!(err.to_string(), "Configuration error: bad flag");

        let err = Error::malformed_record("Room", "id");
        assert_eq!(err.to_string(), "Room record missing required key: id");

        let err = Error::unsupported_format("csv");
        assert_eq!(err.to_string(), "Unsupported format: csv");

        let err = Error::malformed_input("rooms.json", "expected ','");
        assert_eq!(
            err.to_string(),
            "Invalid JSON format in file rooms.json: expected ','"
        );
    }

    #[test]
    fn test_from_io_classifies_kind() {
        let err = Error::from_io(io::Error::from(io::ErrorKind::NotFound), "a.json");
        assert!(matches!(err, Error::FileNotFound { ref path } if path == "a.json"));

        let err = Error::from_io(io::Error::from(io::ErrorKind::PermissionDenied), "b.json");
        assert!(matches!(err, Error::PermissionDenied { ref path } if path == "b.json"));

        let err = Error::from_io(io::Error::other("disk on fire"), "c.json");
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_is_data_error() {
        assert!(Error::malformed_input("x", "y").is_data_error());
        assert!(Error::malformed_record("Student", "room").is_data_error());
        assert!(!Error::config("x").is_data_error());
        assert!(!Error::unsupported_format("csv").is_data_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
