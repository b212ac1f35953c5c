//! Error types for fleet telemetry operations.
//!
//! Every failure in the library surfaces as a [`FleetError`]. Nothing below
//! the binaries catches or reinterprets these; the entry point prints the
//! message and picks the exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`FleetError`].
pub type Result<T> = std::result::Result<T, FleetError>;

/// Errors that can occur while loading, aggregating or configuring.
#[derive(Debug, Error)]
pub enum FleetError {
    /// The input source could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from an already opened source failed.
    #[error("read error: {0}")]
    Read(#[from] io::Error),

    /// A line did not match the active format profile.
    #[error("invalid record at line {line}: {message}")]
    Format {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Which part of the line failed to parse.
        message: String,
    },

    /// An aggregate was requested over a fleet with no records.
    #[error("no vehicles in fleet")]
    EmptyCollection,

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}

impl FleetError {
    /// Shorthand for a [`FleetError::Format`] at `line`.
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format { line, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_includes_path() {
        let err = FleetError::Open {
            path: PathBuf::from("/data/fleet.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let display = err.to_string();

        assert!(display.contains("/data/fleet.csv"), "Error should include path: {display}");
        assert!(display.contains("no such file"), "Error should include cause: {display}");
    }

    #[test]
    fn test_open_error_exposes_source() {
        use std::error::Error as _;

        let err = FleetError::Open {
            path: PathBuf::from("missing.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_format_error_includes_line_number() {
        let err = FleetError::format(7, "invalid speed value");
        let display = err.to_string();

        assert!(display.contains('7'), "Error should include line number: {display}");
        assert!(display.contains("invalid speed value"), "Error should include message: {display}");
    }

    #[test]
    fn test_empty_collection_display() {
        assert_eq!(FleetError::EmptyCollection.to_string(), "no vehicles in fleet");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let err: FleetError = io_err.into();

        assert!(matches!(err, FleetError::Read(_)), "Should convert to Read");
    }

    #[test]
    fn test_config_invalid_includes_key() {
        let err = FleetError::ConfigInvalid {
            key: "workload.workers".to_string(),
            message: "must be at least 1".to_string(),
        };
        let display = err.to_string();

        assert!(display.contains("workload.workers"), "Error should include key: {display}");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FleetError>();
    }
}
