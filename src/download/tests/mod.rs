use super::*;
use crate::config::{DownloadClientConfig, DownloadColumnConfig};
use crate::error::{Error, FrameError};
use crate::events::EventSink;
use crate::frame::Frame;
use crate::types::{DownloadOutcome, Event, OutcomeEncoding};
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


fn test_downloader() -> (FileDownloader, EventSink) {
    let events = EventSink::default();
    let downloader = FileDownloader::new(&DownloadClientConfig::default(), events.clone()).unwrap();
    (downloader, events)
}

/// Mount a GET route returning `status` with `body`
async fn serve(server: &MockServer, route: &str, status: u16, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}
