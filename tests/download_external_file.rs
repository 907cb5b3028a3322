//! End-to-end download column tests through the public API
//!
//! A wiremock server stands in for the remote file host; files land in a
//! temporary directory.

use frame_adapters::{
    DownloadClientConfig, DownloadColumnConfig, DownloadExternalFile, Event, EventSink,
    FileDownloader, Frame,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build(config: DownloadColumnConfig) -> (DownloadExternalFile, EventSink) {
    let events = EventSink::default();
    let downloader = FileDownloader::new(&DownloadClientConfig::default(), events.clone()).unwrap();
    (
        DownloadExternalFile::new(config, downloader, events.clone()),
        events,
    )
}

#[tokio::test]
async fn three_rows_with_explicit_filenames() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .expect(3)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let upload_location = temp.path().join("download_test");
    let location = upload_location.to_string_lossy().to_string();
    let url = format!("{}/file.txt", server.uri());

    let input = Frame::from_rows(
        ["id", "download_url", "dynamic_filename", "upload_location"],
        vec![
            vec![json!(1), json!(url), json!("file_number_1.txt"), json!(location)],
            vec![json!(2), json!(url), json!("file_number_2.txt"), json!(location)],
            vec![json!(3), json!(url), json!("file_number_3.txt"), json!(location)],
        ],
    )
    .unwrap();

    let (transform, _events) = build(
        DownloadColumnConfig::new("download_url", "upload_location")
            .with_filename_column("dynamic_filename")
            .with_output_column("upload_url"),
    );
    let output = transform.transform(input).await.unwrap();

    let records = output.to_records();
    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        let expected = upload_location.join(format!("file_number_{n}.txt"));
        assert_eq!(record["id"], json!(n));
        assert_eq!(record["download_url"], json!(url));
        assert_eq!(record["dynamic_filename"], json!(format!("file_number_{n}.txt")));
        assert_eq!(record["upload_location"], json!(location));
        assert_eq!(record["upload_url"], json!(expected.to_string_lossy()));
        assert_eq!(std::fs::read(&expected).unwrap(), b"ok");
    }
}

#[tokio::test]
async fn http_errors_are_values_not_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expired"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let location = temp.path().to_string_lossy().to_string();
    let input = Frame::from_rows(
        ["download_url", "upload_location"],
        vec![vec![json!(format!("{}/expired", server.uri())), json!(location)]],
    )
    .unwrap();

    let (transform, events) = build(DownloadColumnConfig::new("download_url", "upload_location"));
    let mut rx = events.subscribe();
    let output = transform.transform(input).await.unwrap();

    assert_eq!(output.value(0, "uploaded_url"), Some(&json!("403 - Forbidden")));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);

    let events: Vec<Event> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::DownloadRejected { status: 403, .. }
    )));
}

#[tokio::test]
async fn omitted_filenames_never_collide() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let location = temp.path().to_string_lossy().to_string();
    let rows = (0..20)
        .map(|_| vec![json!(format!("{}/same", server.uri())), json!(location)])
        .collect();
    let input = Frame::from_rows(["download_url", "upload_location"], rows).unwrap();

    let (transform, _events) = build(
        DownloadColumnConfig::new("download_url", "upload_location").with_concurrency(5),
    );
    let output = transform.transform(input).await.unwrap();

    let mut paths: Vec<String> = output
        .column("uploaded_url")
        .unwrap()
        .into_iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 20);
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 20);
}
