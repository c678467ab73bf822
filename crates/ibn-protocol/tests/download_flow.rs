use chrono::NaiveDate;
use ibn_protocol::{
    ChannelNotifier, DownloadOutcome, FileSaver, HttpProtocolService, PayloadDownloader,
    ProtocolId, Severity, DOWNLOAD_FAILED_MESSAGE,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> Url {
    Url::parse(&format!("{}/jsonrpc", server.uri())).unwrap()
}

fn march_7() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

#[tokio::test]
async fn downloads_protocol_into_directory() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "params": { "setupProtocolId": 42 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "result": { "payload": "cGRm\nLWJ5\ndGVz\n" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (notifier, mut notifications) = ChannelNotifier::new();
    let downloader = PayloadDownloader::new(
        HttpProtocolService::new(endpoint(&server)).unwrap(),
        FileSaver::new(dir.path().to_path_buf()),
        notifier,
    )
    .with_date_source(march_7);

    let outcome = downloader.download("E100", ProtocolId::Number(42)).await;

    let expected_path = dir.path().join("IBN-E100-07.03.2024.pdf");
    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            file_name: "IBN-E100-07.03.2024.pdf".to_string(),
            path: expected_path.clone(),
            size: 9,
        }
    );
    assert_eq!(std::fs::read(expected_path).unwrap(), b"pdf-bytes");
    assert!(notifications.try_recv().is_err());
}

#[tokio::test]
async fn server_error_becomes_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (notifier, mut notifications) = ChannelNotifier::new();
    let downloader = PayloadDownloader::new(
        HttpProtocolService::new(endpoint(&server)).unwrap(),
        FileSaver::new(dir.path().to_path_buf()),
        notifier,
    );

    let outcome = downloader.download("E100", ProtocolId::Number(42)).await;

    assert_eq!(outcome, DownloadOutcome::Failed);
    let notification = notifications.try_recv().unwrap();
    assert_eq!(notification.severity, Severity::Danger);
    assert_eq!(notification.message, DOWNLOAD_FAILED_MESSAGE);
    assert!(notifications.try_recv().is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unreachable_backend_becomes_notification() {
    // Nothing listens on the discard port
    let url = Url::parse("http://127.0.0.1:9/jsonrpc").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let (notifier, mut notifications) = ChannelNotifier::new();
    let downloader = PayloadDownloader::new(
        HttpProtocolService::new(url).unwrap(),
        FileSaver::new(dir.path().to_path_buf()),
        notifier,
    );

    let outcome = downloader
        .download("E100", ProtocolId::Text("abc".to_string()))
        .await;

    assert_eq!(outcome, DownloadOutcome::Failed);
    assert_eq!(notifications.try_recv().unwrap().severity, Severity::Danger);
}
