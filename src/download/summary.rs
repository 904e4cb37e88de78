//! Download summary functionality.
//!
//! This module contains the [`Summary`] struct and [`Status`] enum for
//! tracking download results, plus [`RunResult`], the bookkeeping a batch
//! pass accumulates: the adcodes that failed and the filenames that were
//! skipped because they already existed on disk.
//!
//! # Examples
//!
//! ```rust
//! use geobound::download::{Download, Status, Summary};
//! use reqwest::StatusCode;
//! use std::convert::TryFrom;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let download = Download::try_from("https://example.com/110101.json")?;
//! let summary = Summary::new(download, StatusCode::OK, 1024);
//!
//! match summary.status() {
//!     Status::NotStarted => println!("Download not yet started"),
//!     Status::Success => println!("Download completed successfully"),
//!     Status::Fail(msg) => println!("Download failed: {}", msg),
//!     Status::Skipped(reason) => println!("Download skipped: {}", reason),
//! }
//! # Ok(())
//! # }
//! ```

use super::download::Download;
use reqwest::StatusCode;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download was skipped with reason
    Skipped(String),
    /// Download completed successfully
    Success,
}

/// Represents a [`Download`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Downloaded item.
    download: Download,
    /// HTTP status code.
    statuscode: StatusCode,
    /// Download size in bytes.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Download`] [`Summary`].
    pub fn new(download: Download, statuscode: StatusCode, size: u64) -> Self {
        Self {
            download,
            statuscode,
            size,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Download`] [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Get the summary's HTTP status code.
    pub fn statuscode(&self) -> StatusCode {
        self.statuscode
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's download.
    pub fn download(&self) -> &Download {
        &self.download
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Skipped(format!("{}", msg)),
            ..self
        }
    }
}

/// Bookkeeping accumulated over one batch pass.
///
/// `failed` holds the adcode of every target that failed, in processing
/// order. A region whose normal and full files both fail contributes its
/// adcode twice; duplicates are preserved and the retry pass processes
/// each occurrence. `skipped` holds the filename of every target that
/// already existed on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Adcodes of failed targets, ordered, duplicates preserved.
    pub failed: Vec<String>,
    /// Filenames of skipped targets, ordered.
    pub skipped: Vec<String>,
}

impl RunResult {
    /// Fold a sequence of per-target summaries into a [`RunResult`].
    pub fn from_summaries(summaries: &[Summary]) -> Self {
        let mut result = RunResult::default();
        for summary in summaries {
            match summary.status() {
                Status::Fail(_) => result.failed.push(summary.download().adcode.clone()),
                Status::Skipped(_) => result.skipped.push(summary.download().filename.clone()),
                Status::Success | Status::NotStarted => {}
            }
        }
        result
    }

    /// Whether the pass completed without a single failure.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
