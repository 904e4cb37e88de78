//! HTTP module containing HTTP client functionality.
//!
//! This module provides the middleware client construction shared by the
//! index request and the per-file downloads: tracing, a configurable
//! transient-retry policy, default headers, and the fixed request timeout.

pub mod client;

pub use client::{create_http_client, HttpClientConfig, DEFAULT_TIMEOUT};
