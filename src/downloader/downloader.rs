//! Core downloader implementation with fetch logic.
//!
//! This module contains the main [`Downloader`] struct: the sequential
//! batch pass over planned boundary files and the retry orchestration on
//! top of it. Downloads are processed strictly in order, one request in
//! flight at a time; a file already present on disk is skipped and never
//! overwritten.
//!
//! # Examples
//!
//! ```rust,no_run
//! use geobound::downloader::DownloaderBuilder;
//! use geobound::index::RegionEntry;
//!
//! # async fn example() -> geobound::Result<()> {
//! let downloader = DownloaderBuilder::new().build();
//! let entries = vec![RegionEntry::new("110000"), RegionEntry::new("110101")];
//!
//! let outcome = downloader.run(&entries).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

use super::config::{DownloaderConfig, FetchMode};
use crate::download::{Download, RunResult, Status, Summary};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};
use crate::index::RegionEntry;
use crate::progress::display::ProgressDisplay;

use futures::StreamExt;
use reqwest::{Response, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use std::fmt;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info, warn};

/// Terminal state of a full fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every planned target was downloaded or skipped on the first pass.
    AllSucceeded,
    /// The first pass had failures and the retry pass cleared all of them.
    SucceededAfterRetry,
    /// Failures survived the retry pass. Contains the failed adcodes in
    /// processing order, duplicates preserved.
    PartiallyFailed { remaining: Vec<String> },
}

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use geobound::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the base URL under which the boundary files live.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Gets how response bodies are persisted.
    pub fn fetch_mode(&self) -> FetchMode {
        self.config.fetch_mode
    }

    /// Gets the pause applied after each completed streamed download.
    pub fn throttle(&self) -> std::time::Duration {
        self.config.throttle
    }

    /// Gets the per-request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        self.config.timeout
    }

    /// Gets the number of transient request-level retries.
    pub fn request_retries(&self) -> u32 {
        self.config.request_retries
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&reqwest::header::HeaderMap> {
        self.config.headers.as_ref()
    }

    fn client(&self) -> Result<ClientWithMiddleware> {
        let config = HttpClientConfig {
            retries: self.config.request_retries,
            timeout: self.config.timeout,
            headers: self.config.headers.clone(),
        };
        Ok(create_http_client(config)?)
    }

    /// Runs the full workflow: one batch pass over all entries, then a
    /// single retry pass over the failed adcodes.
    ///
    /// The retry pass rebuilds [`RegionEntry`] values from the failed
    /// adcodes, so planning is re-derived: a special code whose `_full`
    /// file is still missing gets it reattempted too. There is never more
    /// than one retry pass.
    pub async fn run(&self, entries: &[RegionEntry]) -> Result<Outcome> {
        let client = self.client()?;

        let first = self.run_pass_with_client(&client, entries).await?;
        if !first.skipped.is_empty() {
            info!("Skipped downloads: {}", first.skipped.join(", "));
        }
        if first.is_clean() {
            return Ok(Outcome::AllSucceeded);
        }

        info!("Retrying failed downloads: {}", first.failed.join(", "));
        let retries: Vec<RegionEntry> = first.failed.iter().map(RegionEntry::new).collect();
        let second = self.run_pass_with_client(&client, &retries).await?;

        if second.is_clean() {
            Ok(Outcome::SucceededAfterRetry)
        } else {
            Ok(Outcome::PartiallyFailed {
                remaining: second.failed,
            })
        }
    }

    /// Executes one batch pass: plan every entry, then download the
    /// planned targets sequentially.
    pub async fn run_pass(&self, entries: &[RegionEntry]) -> Result<RunResult> {
        let client = self.client()?;
        self.run_pass_with_client(&client, entries).await
    }

    async fn run_pass_with_client(
        &self,
        client: &ClientWithMiddleware,
        entries: &[RegionEntry],
    ) -> Result<RunResult> {
        let mut planned = Vec::new();
        for entry in entries {
            planned.extend(entry.plan(&self.config.base_url)?);
        }
        let summaries = self.download_with_client(client, &planned).await;
        Ok(RunResult::from_summaries(&summaries))
    }

    /// Downloads the given targets sequentially, skipping the ones whose
    /// destination file already exists.
    pub async fn download(&self, downloads: &[Download]) -> Result<Vec<Summary>> {
        let client = self.client()?;
        Ok(self.download_with_client(&client, downloads).await)
    }

    async fn download_with_client(
        &self,
        client: &ClientWithMiddleware,
        downloads: &[Download],
    ) -> Vec<Summary> {
        let progress = ProgressDisplay::new(self.config.style_options.clone(), downloads.len());

        let mut summaries = Vec::with_capacity(downloads.len());
        for download in downloads {
            let output = self.config.directory.join(&download.filename);
            let summary = if output.exists() {
                debug!("Skipped: {}", download.filename);
                let size = fs::metadata(&output).await.map(|m| m.len()).unwrap_or(0);
                Summary::new(download.clone(), StatusCode::OK, size).skip("file already exists")
            } else {
                self.fetch(client, download, &output, &progress).await
            };
            if let Status::Fail(reason) = summary.status() {
                warn!("Failed to download {}: {}", download.filename, reason);
            }
            progress.increment_main();
            summaries.push(summary);
        }

        progress.finish();
        summaries
    }

    /// Fetches one file and writes it to disk.
    ///
    /// All failures (connection, timeout, HTTP status, JSON parse, I/O)
    /// are folded into the returned [`Summary`]; nothing propagates.
    async fn fetch(
        &self,
        client: &ClientWithMiddleware,
        download: &Download,
        output: &Path,
        progress: &ProgressDisplay,
    ) -> Summary {
        let summary = Summary::new(download.clone(), StatusCode::BAD_REQUEST, 0);

        debug!("Fetching {}", &download.url);
        let res = match client.get(download.url.as_str()).send().await {
            Ok(res) => res,
            Err(e) => return summary.fail(e),
        };

        if let Err(e) = res.error_for_status_ref() {
            return summary.fail(e);
        }

        debug!("Creating destination directory {:?}", self.config.directory);
        if let Err(e) = fs::create_dir_all(&self.config.directory).await {
            return summary.fail(e);
        }

        match self.config.fetch_mode {
            FetchMode::Buffered => self.persist_buffered(res, download, output).await,
            FetchMode::Streamed => self.persist_streamed(res, download, output, progress).await,
        }
    }

    /// Buffered strategy: read the whole body, parse it as JSON, write it
    /// back out indented in a single open/write/close sequence.
    async fn persist_buffered(&self, res: Response, download: &Download, output: &Path) -> Summary {
        let status = res.status();
        let summary = Summary::new(download.clone(), status, 0);

        let body = match res.bytes().await {
            Ok(body) => body,
            Err(e) => return summary.fail(e),
        };
        let value: serde_json::Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => return summary.fail(e),
        };
        let pretty = match to_indented_json(&value) {
            Ok(pretty) => pretty,
            Err(e) => return summary.fail(e),
        };

        debug!("Writing {:?}", output);
        if let Err(e) = fs::write(output, &pretty).await {
            return summary.fail(e);
        }

        Summary::new(download.clone(), status, pretty.len() as u64).with_status(Status::Success)
    }

    /// Streamed strategy: write each chunk to disk as it arrives, report
    /// byte progress, then pause for the configured throttle.
    async fn persist_streamed(
        &self,
        res: Response,
        download: &Download,
        output: &Path,
        progress: &ProgressDisplay,
    ) -> Summary {
        let status = res.status();
        let size = res.content_length().unwrap_or(0);
        let summary = Summary::new(download.clone(), status, size);
        let pb = progress.create_child_progress(size);

        debug!("Creating destination file {:?}", output);
        let mut file = match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(output)
            .await
        {
            Ok(file) => file,
            Err(e) => {
                progress.finish_child(pb);
                return summary.fail(e);
            }
        };

        let mut received: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            // A failure from here on leaves the partial file on disk.
            let mut chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    progress.finish_child(pb);
                    return summary.fail(e);
                }
            };
            received += chunk.len() as u64;
            pb.inc(chunk.len() as u64);

            if let Err(e) = file.write_all_buf(&mut chunk).await {
                progress.finish_child(pb);
                return summary.fail(e);
            }
        }

        progress.finish_child(pb);
        tokio::time::sleep(self.config.throttle).await;

        Summary::new(download.clone(), status, received).with_status(Status::Success)
    }
}

/// Serialize a JSON value with 4-space indentation.
fn to_indented_json(value: &serde_json::Value) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
