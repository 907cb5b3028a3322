//! Core types and events

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::path::PathBuf;

/// One row's download instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Source URL
    pub url: String,
    /// Destination directory (created with parents if absent)
    pub directory: PathBuf,
    /// Destination filename, a single path component
    pub filename: String,
}

impl DownloadRequest {
    /// Create a new request
    pub fn new(
        url: impl Into<String>,
        directory: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            directory: directory.into(),
            filename: filename.into(),
        }
    }

    /// Path the body is written to on success
    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Result of one download attempt that reached the server
///
/// Network and filesystem failures are errors, not outcomes.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// Server answered 200 and the body was written
    Saved {
        /// Where the body was written
        path: PathBuf,
    },
    /// Server answered with anything other than 200
    Rejected {
        /// HTTP status code
        #[serde(rename = "code")]
        status: u16,
        /// Reason phrase for the status code
        reason: String,
    },
}

impl DownloadOutcome {
    /// True for [`DownloadOutcome::Saved`]
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }

    /// The written path, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DownloadOutcome::Saved { path } => Some(path),
            DownloadOutcome::Rejected { .. } => None,
        }
    }

    /// String form used by existing consumers: the path on success, or
    /// `"<status> - <reason>"` otherwise
    pub fn to_legacy_string(&self) -> String {
        self.to_string()
    }

    /// Encode as a column value
    pub fn to_value(&self, encoding: OutcomeEncoding) -> Value {
        match encoding {
            OutcomeEncoding::Legacy => Value::String(self.to_legacy_string()),
            OutcomeEncoding::Tagged => match self {
                DownloadOutcome::Saved { path } => json!({
                    "status": "saved",
                    "path": path.to_string_lossy(),
                }),
                DownloadOutcome::Rejected { status, reason } => json!({
                    "status": "rejected",
                    "code": status,
                    "reason": reason,
                }),
            },
        }
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Saved { path } => write!(f, "{}", path.to_string_lossy()),
            DownloadOutcome::Rejected { status, reason } => write!(f, "{} - {}", status, reason),
        }
    }
}

/// How a [`DownloadOutcome`] is stored in the output column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeEncoding {
    /// Path string, or `"<status> - <reason>"`
    #[default]
    Legacy,
    /// JSON object with an explicit `status` tag
    Tagged,
}

/// Event emitted by the adapters
///
/// Events are delivered through an [`EventSink`](crate::events::EventSink) and
/// mirrored to `tracing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Both `query` and `dbtable` were set; `dbtable` is ignored
    TableIgnored {
        /// The ignored table name
        table: String,
    },

    /// A query is about to be handed to the loader
    QueryExecuting {
        /// The query text
        query: String,
    },

    /// A table is about to be read
    TableReading {
        /// The table name
        table: String,
    },

    /// A download returned 200 and the body was written
    FileSaved {
        /// Source URL
        url: String,
        /// Written path
        path: PathBuf,
        /// Body size in bytes
        bytes: u64,
    },

    /// A download returned something other than 200
    DownloadRejected {
        /// Source URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Reason phrase
        reason: String,
    },

    /// A download column transformation finished
    ColumnDownloaded {
        /// Output column name
        column: String,
        /// Rows processed
        rows: usize,
        /// Rows whose body was written
        saved: usize,
        /// Rows with a non-200 response
        rejected: usize,
    },
}
