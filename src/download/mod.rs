//! Download module containing download-related functionality.
//!
//! This module provides the structures a batch pass works with: the core
//! [`Download`] target, per-target [`Summary`] and [`Status`] reporting,
//! and the [`RunResult`] bookkeeping (failed adcodes, skipped filenames)
//! derived from one pass.
//!
//! # Examples
//!
//! ```rust
//! use geobound::download::Download;
//! use std::convert::TryFrom;
//!
//! let download = Download::try_from("https://example.com/bound/110101.json")?;
//! println!("Downloading: {}", download.filename);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod download;
pub mod summary;

pub use download::Download;
pub use summary::{RunResult, Status, Summary};
