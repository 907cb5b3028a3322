//! Per-row external file downloads.
//!
//! - [`fetch`] - One GET, body saved on `200`, in-band outcome otherwise
//! - [`filename`] - Injectable sources for generated filenames
//! - [`transform`] - Row-wise application over a [`Frame`](crate::Frame)

pub mod fetch;
pub mod filename;
pub mod transform;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use fetch::FileDownloader;
pub use filename::{FilenameSource, SeededNames, UuidNames};
pub use transform::DownloadExternalFile;
