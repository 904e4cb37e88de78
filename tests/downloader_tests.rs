//! Tests for the downloader module functionality.
//!
//! This file contains tests for the DownloaderBuilder pattern and for the
//! batch-pass semantics: skip-if-exists, idempotence, the single bounded
//! retry pass, and both fetch strategies. HTTP behavior is exercised
//! against a local wiremock server; connection-level failures use a base
//! URL nothing listens on.

use geobound::download::{Download, Status};
use geobound::downloader::{DownloaderBuilder, FetchMode, Outcome};
use geobound::index::DEFAULT_BASE_URL;

use reqwest::header::{HeaderValue, USER_AGENT};
use std::fs;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_builder_defaults() {
    let downloader = DownloaderBuilder::new().build();

    assert_eq!(downloader.directory().to_str(), Some("dist"));
    assert_eq!(downloader.base_url().as_str(), DEFAULT_BASE_URL);
    assert_eq!(downloader.fetch_mode(), FetchMode::Buffered);
    assert_eq!(downloader.throttle(), Duration::from_secs(1));
    assert_eq!(downloader.timeout(), Duration::from_secs(10));
    assert_eq!(downloader.request_retries(), 0);
    assert!(downloader.headers().is_none());
}

#[test]
fn test_builder_configuration() {
    let temp_dir = create_temp_dir();
    let base = unroutable_base();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .base_url(base.clone())
        .fetch_mode(FetchMode::Streamed)
        .throttle(Duration::from_secs(3))
        .timeout(Duration::from_secs(5))
        .request_retries(2)
        .build();

    assert_eq!(downloader.directory(), temp_dir.path());
    assert_eq!(downloader.base_url(), &base);
    assert_eq!(downloader.fetch_mode(), FetchMode::Streamed);
    assert_eq!(downloader.throttle(), Duration::from_secs(3));
    assert_eq!(downloader.timeout(), Duration::from_secs(5));
    assert_eq!(downloader.request_retries(), 2);
}

#[test]
fn test_builder_headers() {
    let downloader = DownloaderBuilder::new()
        .header(USER_AGENT, HeaderValue::from_static("geobound-test"))
        .build();

    assert!(downloader.headers().is_some());
    assert_eq!(
        downloader.headers().unwrap().get(USER_AGENT),
        Some(&HeaderValue::from_static("geobound-test"))
    );
}

#[test]
fn test_downloader_clone_and_debug() {
    let downloader = DownloaderBuilder::new().build();
    let cloned = downloader.clone();

    assert_eq!(downloader.fetch_mode(), cloned.fetch_mode());
    assert_eq!(downloader.throttle(), cloned.throttle());

    let debug_str = format!("{:?}", downloader);
    assert!(debug_str.contains("Downloader"));
    assert!(debug_str.contains("config"));
}

#[tokio::test]
async fn test_existing_file_is_skipped_and_never_overwritten() {
    let temp_dir = create_temp_dir();
    let base = unroutable_base();
    create_temp_file(temp_dir.path(), "110101.json", b"original content");

    let downloader = hidden_downloader(temp_dir.path(), &base);
    let download = Download::normal(&base, "110101").unwrap();
    let summaries = downloader.download(&[download]).await.unwrap();

    assert_eq!(summaries.len(), 1);
    assert!(matches!(summaries[0].status(), Status::Skipped(_)));
    assert_eq!(
        fs::read(temp_dir.path().join("110101.json")).unwrap(),
        b"original content"
    );
}

#[tokio::test]
async fn test_second_pass_is_idempotent() {
    let server = MockServer::start().await;
    mock_boundary(&server, "/110000.json").await;
    mock_boundary(&server, "/110000_full.json").await;
    mock_boundary(&server, "/110101.json").await;

    let temp_dir = create_temp_dir();
    let downloader = hidden_downloader(temp_dir.path(), &server_base(&server));
    let regions = entries(&["110000", "110101"]);

    let first = downloader.run_pass(&regions).await.unwrap();
    assert!(first.is_clean());
    assert!(first.skipped.is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 3);

    // Everything exists now: the second pass downloads nothing.
    let second = downloader.run_pass(&regions).await.unwrap();
    assert!(second.is_clean());
    assert_eq!(
        second.skipped,
        vec!["110000.json", "110000_full.json", "110101.json"]
    );
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 3);
}

#[tokio::test]
async fn test_run_retries_exactly_once() {
    let server = MockServer::start().await;
    // Two requests total for the failing file: one per pass, never more.
    Mock::given(method("GET"))
        .and(path("/110101.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let downloader = hidden_downloader(temp_dir.path(), &server_base(&server));

    let outcome = downloader.run(&entries(&["110101"])).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::PartiallyFailed {
            remaining: vec!["110101".to_string()]
        }
    );
    assert!(!temp_dir.path().join("110101.json").exists());

    server.verify().await;
}

#[tokio::test]
async fn test_run_all_succeeded() {
    let server = MockServer::start().await;
    mock_boundary(&server, "/110000.json").await;
    mock_boundary(&server, "/110000_full.json").await;
    mock_boundary(&server, "/110101.json").await;

    let temp_dir = create_temp_dir();
    let downloader = hidden_downloader(temp_dir.path(), &server_base(&server));

    let outcome = downloader.run(&entries(&["110000", "110101"])).await.unwrap();
    assert_eq!(outcome, Outcome::AllSucceeded);
    assert_file_exists(&temp_dir.path().join("110000.json"));
    assert_file_exists(&temp_dir.path().join("110000_full.json"));
    assert_file_exists(&temp_dir.path().join("110101.json"));
}

/// The worked scenario: the normal file of the special code fails on both
/// passes, everything else succeeds. The retry pass re-derives planning,
/// finds the `_full` file already on disk, skips it, and reattempts only
/// the missing normal file.
#[tokio::test]
async fn test_retry_rederives_planning_for_special_codes() {
    let server = MockServer::start().await;
    mock_failure(&server, "/110000.json", 500).await;
    mock_boundary(&server, "/110000_full.json").await;
    mock_boundary(&server, "/110101.json").await;

    let temp_dir = create_temp_dir();
    let downloader = hidden_downloader(temp_dir.path(), &server_base(&server));

    let outcome = downloader.run(&entries(&["110000", "110101"])).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::PartiallyFailed {
            remaining: vec!["110000".to_string()]
        }
    );
    assert!(!temp_dir.path().join("110000.json").exists());
    assert_file_exists(&temp_dir.path().join("110000_full.json"));
    assert_file_exists(&temp_dir.path().join("110101.json"));
}

#[tokio::test]
async fn test_duplicate_adcodes_preserved_in_failures() {
    let server = MockServer::start().await;
    mock_failure(&server, "/110000.json", 500).await;
    mock_failure(&server, "/110000_full.json", 500).await;

    let temp_dir = create_temp_dir();
    let downloader = hidden_downloader(temp_dir.path(), &server_base(&server));

    let result = downloader.run_pass(&entries(&["110000"])).await.unwrap();
    assert_eq!(result.failed, vec!["110000", "110000"]);
}

#[tokio::test]
async fn test_buffered_mode_reindents_json() {
    let server = MockServer::start().await;
    mock_boundary(&server, "/110101.json").await;

    let temp_dir = create_temp_dir();
    let downloader = hidden_downloader(temp_dir.path(), &server_base(&server));

    let result = downloader.run_pass(&entries(&["110101"])).await.unwrap();
    assert!(result.is_clean());

    let written = fs::read_to_string(temp_dir.path().join("110101.json")).unwrap();
    assert!(written.contains("\n    \"type\""), "body is indented");
    assert!(written.contains("北京市"), "unicode survives unescaped");

    // Re-serialization is lossless for structure and content.
    let original: serde_json::Value = serde_json::from_str(TEST_BOUNDARY).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(original, reparsed);
}

#[tokio::test]
async fn test_streamed_mode_writes_raw_bytes() {
    let server = MockServer::start().await;
    mock_boundary(&server, "/110101.json").await;

    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::hidden()
        .directory(temp_dir.path().to_path_buf())
        .base_url(server_base(&server))
        .fetch_mode(FetchMode::Streamed)
        .throttle(Duration::from_secs(0))
        .build();

    let result = downloader.run_pass(&entries(&["110101"])).await.unwrap();
    assert!(result.is_clean());

    // No re-parsing in streamed mode: bytes land on disk as served.
    let written = fs::read_to_string(temp_dir.path().join("110101.json")).unwrap();
    assert_eq!(written, TEST_BOUNDARY);
}

#[tokio::test]
async fn test_connection_failure_is_contained() {
    let temp_dir = create_temp_dir();
    let base = unroutable_base();
    let downloader = hidden_downloader(temp_dir.path(), &base);

    let download = Download::normal(&base, "110101").unwrap();
    let summaries = downloader.download(&[download]).await.unwrap();

    assert_eq!(summaries.len(), 1);
    assert!(matches!(summaries[0].status(), Status::Fail(_)));
    assert!(!temp_dir.path().join("110101.json").exists());
}
