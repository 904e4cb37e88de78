use geobound::downloader::{Downloader, DownloaderBuilder};
use geobound::RegionEntry;
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Common test constants
pub const TEST_BOUNDARY: &str = r#"{"type":"FeatureCollection","features":[],"name":"北京市"}"#;

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// A base URL nothing listens on; every request fails fast with a
/// connection error.
pub fn unroutable_base() -> Url {
    Url::parse("http://127.0.0.1:9").expect("valid test URL")
}

/// Creates region entries from bare adcodes
pub fn entries(adcodes: &[&str]) -> Vec<RegionEntry> {
    adcodes.iter().map(|adcode| RegionEntry::new(*adcode)).collect()
}

/// Creates a downloader with hidden progress bars writing into `dir`
pub fn hidden_downloader(dir: &Path, base: &Url) -> Downloader {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .base_url(base.clone())
        .build()
}

/// Parses a mock server's uri into a base URL
pub fn server_base(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("mock server uri is a valid URL")
}

/// Mounts a 200 response carrying [`TEST_BOUNDARY`] for the given path
pub async fn mock_boundary(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TEST_BOUNDARY, "application/json"))
        .mount(server)
        .await;
}

/// Mounts an error status for the given path
pub async fn mock_failure(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}
