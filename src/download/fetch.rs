//! Single-URL download to local storage

use reqwest::StatusCode;
use std::path::Path;

use crate::config::DownloadClientConfig;
use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::types::{DownloadOutcome, DownloadRequest, Event};
use crate::utils::validate_filename;

/// Fetches one URL and saves the body on a `200` response
///
/// Safe to share across tasks: it holds only a connection pool and an event
/// sink. Two requests resolving to the same destination race with
/// last-writer-wins; nothing here locks the file.
#[derive(Clone, Debug)]
pub struct FileDownloader {
    client: reqwest::Client,
    events: EventSink,
}

impl FileDownloader {
    /// Build a downloader from client settings
    ///
    /// With the default config there is no request timeout and reqwest's
    /// default redirect policy applies.
    pub fn new(config: &DownloadClientConfig, events: EventSink) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(Self {
            client: builder.build()?,
            events,
        })
    }

    /// Use an existing client
    pub fn with_client(client: reqwest::Client, events: EventSink) -> Self {
        Self { client, events }
    }

    /// Download `url` into `directory/filename`
    ///
    /// # Returns
    ///
    /// [`DownloadOutcome::Saved`] with the destination path if the server
    /// answered exactly `200`, otherwise [`DownloadOutcome::Rejected`] with
    /// the status and the reason phrase from the status line. Other 2xx codes count as rejected and
    /// nothing is written for them.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFilename`] if `filename` is not a single path component
    /// - [`Error::InvalidUrl`] if `url` does not parse; the directory has
    ///   already been created at that point
    /// - [`Error::Filesystem`] if the directory cannot be created or the body
    ///   cannot be written
    /// - [`Error::Network`] for DNS, connection and timeout failures
    pub async fn download_url(
        &self,
        url: &str,
        directory: impl AsRef<Path>,
        filename: &str,
    ) -> Result<DownloadOutcome> {
        validate_filename(filename)?;

        let directory = directory.as_ref();
        // create_dir_all tolerates a concurrent creator
        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|source| Error::Filesystem {
                path: directory.to_path_buf(),
                source,
            })?;
        let destination = directory.join(filename);

        let parsed = url::Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let reason = reason_phrase(&response);
            self.events.emit(Event::DownloadRejected {
                url: url.to_string(),
                status: status.as_u16(),
                reason: reason.clone(),
            });
            return Ok(DownloadOutcome::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.bytes().await?;
        tokio::fs::write(&destination, &body)
            .await
            .map_err(|source| Error::Filesystem {
                path: destination.clone(),
                source,
            })?;

        self.events.emit(Event::FileSaved {
            url: url.to_string(),
            path: destination.clone(),
            bytes: body.len() as u64,
        });
        Ok(DownloadOutcome::Saved { path: destination })
    }

    /// Download one [`DownloadRequest`]
    pub async fn download(&self, request: &DownloadRequest) -> Result<DownloadOutcome> {
        self.download_url(&request.url, &request.directory, &request.filename)
            .await
    }
}

/// Reason phrase from the status line, falling back to the canonical one
///
/// hyper keeps only phrases that differ from the canonical text.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
