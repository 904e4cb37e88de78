//! Geobound bulk-downloads administrative boundary JSON files and minifies
//! directories of JSON files.
//!
//! The fetch workflow has three phases: acquire the region index, download
//! every planned boundary file sequentially (skipping files already on
//! disk), and run a single retry pass over the failures. The minifier is
//! independent: it walks a directory tree and re-serializes every JSON
//! file compactly into a flat output directory.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geobound::downloader::DownloaderBuilder;
//! use geobound::http::{create_http_client, HttpClientConfig};
//! use geobound::index::{fetch_index, DEFAULT_INDEX_URL};
//! use geobound::Error;
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let index_url = Url::parse(DEFAULT_INDEX_URL).expect("valid constant");
//! let entries = fetch_index(&client, &index_url).await?;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("dist"))
//!     .build();
//! let outcome = downloader.run(&entries).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`index`] - Region index acquisition (remote or local) and planning
//! - [`download`] - The `Download` target plus `Summary`/`RunResult` bookkeeping
//! - [`downloader`] - The `Downloader` and `DownloaderBuilder` orchestrating the passes
//! - [`http`] - HTTP client construction with middleware
//! - [`progress`] - Progress bar styling and display management
//! - [`minify`] - Recursive JSON minification
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod index;
pub mod minify;
pub mod progress;

pub use download::{Download, RunResult, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder, FetchMode, Outcome};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use index::{fetch_index, load_index, RegionEntry, DEFAULT_BASE_URL, DEFAULT_INDEX_URL};
pub use minify::{minify_dir, MinifyReport};
pub use progress::{ProgressBarOpts, StyleOptions};
