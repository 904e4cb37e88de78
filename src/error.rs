//! Error handling for the geobound library.
//!
//! This module provides centralized error handling for the operations that
//! are allowed to fail loudly: index acquisition, URL construction, and the
//! minifier's output-directory setup. Per-file download failures never use
//! these types; they are folded into [`Status::Fail`](crate::download::Status)
//! at the single-file boundary.

use std::io;
use thiserror::Error;

/// Errors that can happen when using geobound.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other
    /// categories, typically representing unexpected system-level failures.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    ///
    /// Returned when a provided URL cannot be parsed, or when a boundary
    /// file URL cannot be derived from a base URL and an adcode.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Wraps standard I/O errors from file operations, such as reading a
    /// local index file or creating the output directory.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the Reqwest middleware stack.
    ///
    /// The index request goes through a [`ClientWithMiddleware`], whose
    /// error type is distinct from plain [`reqwest::Error`].
    ///
    /// [`ClientWithMiddleware`]: reqwest_middleware::ClientWithMiddleware
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// JSON (de)serialization error.
    ///
    /// Raised when the index document is not a valid JSON array. Parse
    /// failures of individual boundary or minifier files are reported per
    /// file instead and never surface through this variant.
    #[error("JSON error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias for operations that can fail with a geobound error.
pub type Result<T> = std::result::Result<T, Error>;
