//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use geobound::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./dist"))
//!     .build();
//! ```
//!
//! ## Streamed Mode with a Custom Throttle
//!
//! ```rust
//! use geobound::downloader::{DownloaderBuilder, FetchMode};
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::new()
//!     .fetch_mode(FetchMode::Streamed)
//!     .throttle(Duration::from_secs(2))
//!     .build();
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use geobound::downloader::DownloaderBuilder;
//!
//! let downloader = DownloaderBuilder::hidden().build();
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::downloader::FetchMode;
use crate::{ProgressBarOpts, StyleOptions};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use geobound::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().directory("dist".into()).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options =
            StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
        builder
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Sets the base URL under which the boundary files live.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.config.base_url = base_url;
        self
    }

    /// Selects how response bodies are persisted.
    pub fn fetch_mode(mut self, fetch_mode: FetchMode) -> Self {
        self.config.fetch_mode = fetch_mode;
        self
    }

    /// Sets the pause after each completed streamed download.
    pub fn throttle(mut self, throttle: Duration) -> Self {
        self.config.throttle = throttle;
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the number of transient request-level retries.
    ///
    /// This is distinct from the orchestrator's single retry pass, which
    /// always runs when the first pass had failures.
    pub fn request_retries(mut self, request_retries: u32) -> Self {
        self.config.request_retries = request_retries;
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// Can be called multiple times; all `HeaderMap`s are merged into one.
    /// See also [`header()`] to add headers one at a time.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use geobound::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::USER_AGENT, ua)]))
    ///     .build();
    /// ```
    ///
    /// [`header()`]: DownloaderBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add a single http header.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use geobound::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, ua)
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
