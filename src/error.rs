//! Error types for frame-adapters
//!
//! Every fallible operation in the crate returns [`Result`]. A few outcomes are
//! deliberately *not* errors:
//! - An HTTP response other than `200` is reported in-band as
//!   [`DownloadOutcome::Rejected`](crate::types::DownloadOutcome::Rejected)
//! - Network, filesystem and configuration failures are fatal and surface here

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for frame-adapters operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for frame-adapters
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "dbtable")
        key: Option<String>,
    },

    /// Network error (DNS failure, refused connection, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The download URL could not be parsed
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as it appeared in the input
        url: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },

    /// Directory creation or file write failed
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// The path being created or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Filename does not resolve to a single path component
    #[error("invalid filename '{0}': must be a single path component")]
    InvalidFilename(String),

    /// Dataset shape or value type mismatch
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Error raised by a [`FormatLoader`](crate::jdbc::FormatLoader) implementation
    #[error("loader error: {0}")]
    Loader(String),

    /// I/O error outside the download path (e.g. reading a config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a configuration error tied to a specific setting
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Returns true if this error was raised before any I/O took place
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}

/// Frame (dataset) errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// A configured column is not present in the frame
    #[error("column '{0}' not found")]
    MissingColumn(String),

    /// A row does not have one value per column
    #[error("row {row} has {actual} values, expected {expected}")]
    RowArity {
        /// Zero-based row index
        row: usize,
        /// Number of columns in the frame
        expected: usize,
        /// Number of values in the row
        actual: usize,
    },

    /// A new column does not have one value per row
    #[error("column '{column}' has {actual} values, frame has {expected} rows")]
    ColumnLength {
        /// Column being added
        column: String,
        /// Number of rows in the frame
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// A value that must be a string is something else
    #[error("column '{column}' row {row}: expected a string, found {found}")]
    NotAString {
        /// Column name
        column: String,
        /// Zero-based row index
        row: usize,
        /// JSON type name of the offending value
        found: &'static str,
    },
}
