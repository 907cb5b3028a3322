//! Row-wise download column transformation

use futures::{StreamExt, TryStreamExt};
use serde_json::Value;
use std::sync::Arc;

use super::fetch::FileDownloader;
use super::filename::{FilenameSource, UuidNames};
use crate::config::DownloadColumnConfig;
use crate::error::{FrameError, Result};
use crate::events::EventSink;
use crate::frame::{Frame, cell, value_kind};
use crate::types::{DownloadOutcome, DownloadRequest, Event};

/// Adds a column holding the outcome of downloading each row's URL
///
/// For every row, the URL comes from `download_column`, the directory from
/// `upload_location_column`, and the filename from `filename_column`. If no
/// filename column is configured, or a row's filename is null, a fresh name
/// is drawn from the [`FilenameSource`] for that row. The output column is
/// appended, or overwritten if it already exists; every other column passes
/// through unchanged and row order is preserved.
///
/// # Examples
///
/// ```no_run
/// use frame_adapters::config::{DownloadClientConfig, DownloadColumnConfig};
/// use frame_adapters::download::{DownloadExternalFile, FileDownloader};
/// use frame_adapters::{EventSink, Frame};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let events = EventSink::default();
/// let downloader = FileDownloader::new(&DownloadClientConfig::default(), events.clone())?;
/// let transform = DownloadExternalFile::new(
///     DownloadColumnConfig::new("download_url", "upload_location")
///         .with_filename_column("dynamic_filename"),
///     downloader,
///     events,
/// );
///
/// let frame = Frame::from_rows(
///     ["download_url", "dynamic_filename", "upload_location"],
///     vec![vec![
///         json!("https://example.com/file.txt"),
///         json!("file_number_1.txt"),
///         json!("/tmp/download_test"),
///     ]],
/// )?;
/// let enriched = transform.transform(frame).await?;
/// println!("{:?}", enriched.column("uploaded_url")?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DownloadExternalFile {
    config: DownloadColumnConfig,
    downloader: FileDownloader,
    names: Arc<dyn FilenameSource>,
    events: EventSink,
}

impl DownloadExternalFile {
    /// Create the transformation with random UUID filenames
    pub fn new(config: DownloadColumnConfig, downloader: FileDownloader, events: EventSink) -> Self {
        Self {
            config,
            downloader,
            names: Arc::new(UuidNames),
            events,
        }
    }

    /// Replace the filename source (e.g. with a seeded one)
    pub fn with_filename_source(mut self, names: Arc<dyn FilenameSource>) -> Self {
        self.names = names;
        self
    }

    /// Column wiring
    pub fn config(&self) -> &DownloadColumnConfig {
        &self.config
    }

    /// Resolve one [`DownloadRequest`] per row, in row order
    ///
    /// All configured columns are checked before any value is read.
    pub fn requests(&self, frame: &Frame) -> Result<Vec<DownloadRequest>> {
        let url_idx = frame.require_column(&self.config.download_column)?;
        let dir_idx = frame.require_column(&self.config.upload_location_column)?;
        let name_idx = match &self.config.filename_column {
            Some(column) => Some(frame.require_column(column)?),
            None => None,
        };

        frame
            .rows()
            .iter()
            .enumerate()
            .map(|(row, values)| {
                let width = frame.columns().len();
                let url = string_at(
                    cell(values, url_idx, row, width)?,
                    &self.config.download_column,
                    row,
                )?;
                let directory = string_at(
                    cell(values, dir_idx, row, width)?,
                    &self.config.upload_location_column,
                    row,
                )?;
                let filename = match (name_idx, &self.config.filename_column) {
                    (Some(idx), Some(column)) => match cell(values, idx, row, width)? {
                        Value::Null => self.names.next_name(),
                        value => string_at(value, column, row)?.to_string(),
                    },
                    _ => self.names.next_name(),
                };
                Ok(DownloadRequest::new(url, directory, filename))
            })
            .collect()
    }

    /// Download every row and add the output column
    ///
    /// At most `concurrency` downloads run at once. The first fatal error
    /// (network, filesystem, invalid value) aborts the transformation; non-200
    /// responses are recorded in the column instead.
    pub async fn transform(&self, frame: Frame) -> Result<Frame> {
        let requests = self.requests(&frame)?;
        let concurrency = self.config.concurrency.max(1);

        let outcomes: Vec<DownloadOutcome> = futures::stream::iter(requests.iter())
            .map(|request| self.downloader.download(request))
            .buffered(concurrency)
            .try_collect()
            .await?;

        let saved = outcomes.iter().filter(|o| o.is_saved()).count();
        let values: Vec<Value> = outcomes
            .iter()
            .map(|outcome| outcome.to_value(self.config.encoding))
            .collect();

        let frame = frame.with_column(self.config.output_column.clone(), values)?;

        self.events.emit(Event::ColumnDownloaded {
            column: self.config.output_column.clone(),
            rows: outcomes.len(),
            saved,
            rejected: outcomes.len() - saved,
        });
        Ok(frame)
    }
}

fn string_at<'v>(value: &'v Value, column: &str, row: usize) -> Result<&'v str> {
    value.as_str().ok_or_else(|| {
        FrameError::NotAString {
            column: column.to_string(),
            row,
            found: value_kind(value),
        }
        .into()
    })
}
