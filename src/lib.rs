//! # frame-adapters
//!
//! Two small adapters for DataFrame pipelines:
//!
//! - **JDBC reader** - assembles the flat option set for a JDBC source,
//!   revealing secrets only at the last moment, and hands it to the host
//!   engine's [`FormatLoader`](jdbc::FormatLoader)
//! - **External file downloader** - fetches the URL found in one column of a
//!   [`Frame`] for every row, saves the body locally and records the outcome
//!   in another column
//!
//! Distributed execution, partitioning and the JDBC wire protocol belong to the
//! host engine; this crate only configures and invokes it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frame_adapters::config::{DownloadClientConfig, DownloadColumnConfig};
//! use frame_adapters::download::{DownloadExternalFile, FileDownloader};
//! use frame_adapters::{EventSink, Frame};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let events = EventSink::default();
//!
//!     // Subscribe to events
//!     let mut rx = events.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = rx.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let downloader = FileDownloader::new(&DownloadClientConfig::default(), events.clone())?;
//!     let transform = DownloadExternalFile::new(
//!         DownloadColumnConfig::new("download_url", "upload_location"),
//!         downloader,
//!         events,
//!     );
//!
//!     let frame = Frame::from_rows(
//!         ["download_url", "upload_location"],
//!         vec![vec![json!("https://example.com/report.csv"), json!("/tmp/reports")]],
//!     )?;
//!     let frame = transform.transform(frame).await?;
//!     println!("{:?}", frame.column("uploaded_url")?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Per-row external file downloads
pub mod download;
/// Error types
pub mod error;
/// Event sink for logging and observability
pub mod events;
/// In-memory tabular dataset
pub mod frame;
/// JDBC option assembly and reader
pub mod jdbc;
/// Opaque credential holder
pub mod secret;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ConnectionConfig, DownloadClientConfig, DownloadColumnConfig};
pub use download::{DownloadExternalFile, FileDownloader, FilenameSource, SeededNames, UuidNames};
pub use error::{Error, FrameError, Result};
pub use events::EventSink;
pub use frame::Frame;
pub use jdbc::{FormatLoader, JdbcOptions, JdbcReader, OptionsBuilder};
pub use secret::SecretString;
pub use types::{DownloadOutcome, DownloadRequest, Event, OutcomeEncoding};
