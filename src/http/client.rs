//! HTTP client setup and middleware configuration.
//!
//! This module builds the middleware client every request goes through:
//! tracing middleware for request/response logging, a transient-retry
//! policy, optional default headers, and the fixed per-request timeout.
//!
//! The transient-retry count defaults to 0: retrying failed boundary files
//! is the job of the orchestrator's single retry pass, not of the request
//! layer. The policy stays configurable for embedders who want both.
//!
//! # Examples
//!
//! ```rust
//! use geobound::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

use reqwest::header::HeaderMap;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Fixed per-request timeout applied to every HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Number of transient request-level retries.
    pub retries: u32,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: 0,
            timeout: DEFAULT_TIMEOUT,
            headers: None,
        }
    }
}

/// Creates an HTTP client with middleware configuration.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);

    let mut inner_client_builder = reqwest::Client::builder().timeout(config.timeout);

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

    Ok(client)
}
