//! Progress module containing progress bar functionality.
//!
//! This module provides progress bar styling and display management for
//! the fetcher: a main bar counting boundary files and, in streamed mode,
//! a per-file byte bar.

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
