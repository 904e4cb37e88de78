//! Configuration structures and defaults for the downloader.
//!
//! # Examples
//!
//! ```rust
//! use geobound::downloader::FetchMode;
//!
//! // Buffered is the default: parse then re-serialize with indentation.
//! assert_eq!(FetchMode::default(), FetchMode::Buffered);
//! ```

use crate::index::DEFAULT_BASE_URL;
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// How a boundary file's response body is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Fetch the whole response, parse it as JSON, and write it back out
    /// with 4-space indentation in a single open/write/close sequence.
    /// Nothing is written when the fetch or the parse fails.
    #[default]
    Buffered,
    /// Chunked transfer: every chunk is written to disk raw as it arrives,
    /// with byte progress reported, followed by a fixed post-download
    /// pause. A mid-stream failure leaves a truncated file on disk.
    Streamed,
}

/// Configuration structure for the downloader.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Base URL under which the per-region boundary files live.
    pub base_url: Url,
    /// How response bodies are persisted.
    pub fetch_mode: FetchMode,
    /// Pause after each completed streamed download.
    pub throttle: Duration,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
    /// Transient request-level retries (the orchestrator's single retry
    /// pass is separate and always runs).
    pub request_retries: u32,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Downloader style options.
    pub style_options: StyleOptions,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("dist"),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            fetch_mode: FetchMode::default(),
            throttle: Duration::from_secs(1),
            timeout: crate::http::DEFAULT_TIMEOUT,
            request_retries: 0,
            headers: None,
            style_options: StyleOptions::default(),
        }
    }
}
