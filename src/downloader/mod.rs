//! Downloader module containing the sequential fetch logic, builder
//! pattern, and configuration.
//!
//! # Overview
//!
//! The downloader module is organized into three main components:
//!
//! - `downloader` - Core Downloader struct with the batch pass and the
//!   single bounded retry pass
//! - `builder` - DownloaderBuilder for flexible configuration using the
//!   builder pattern
//! - `config` - Configuration structures and the [`FetchMode`] selection
//!
//! # Examples
//!
//! ```rust,no_run
//! use geobound::downloader::DownloaderBuilder;
//! use geobound::index::RegionEntry;
//! use std::path::PathBuf;
//!
//! # async fn example() -> geobound::Result<()> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./dist"))
//!     .build();
//!
//! let entries = vec![RegionEntry::new("110000")];
//! let outcome = downloader.run(&entries).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, FetchMode};
pub use downloader::{Downloader, Outcome};
