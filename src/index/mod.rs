//! Region index acquisition.
//!
//! The index document is a JSON array enumerating every administrative
//! region to process. It can come from the remote endpoint or from a local
//! file; both produce the same ordered sequence of [`RegionEntry`] values.
//! Unlike per-file downloads, a failure here is fatal and is never retried:
//! errors propagate to the caller via `?`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use geobound::http::{create_http_client, HttpClientConfig};
//! use geobound::index::{fetch_index, DEFAULT_INDEX_URL};
//! use reqwest::Url;
//!
//! # async fn example() -> geobound::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let url = Url::parse(DEFAULT_INDEX_URL).expect("valid constant");
//! let entries = fetch_index(&client, &url).await?;
//! println!("{} regions listed", entries.len());
//! # Ok(())
//! # }
//! ```

use crate::download::Download;
use crate::error::Result;

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::debug;

/// Base URL under which the per-region boundary files live.
pub const DEFAULT_BASE_URL: &str = "https://geo.datav.aliyun.com/areas_v3/bound";

/// URL of the remote index document.
pub const DEFAULT_INDEX_URL: &str = "https://geo.datav.aliyun.com/areas_v3/bound/all.json";

/// One entry of the region index.
///
/// Only the adcode is used; every other field of the index objects is
/// ignored. The adcode arrives as a JSON string or number depending on the
/// document and is normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionEntry {
    #[serde(deserialize_with = "adcode_as_string")]
    pub adcode: String,
}

fn adcode_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

impl RegionEntry {
    /// Creates an entry from a bare adcode, as the retry pass does.
    pub fn new(adcode: impl Into<String>) -> Self {
        Self {
            adcode: adcode.into(),
        }
    }

    /// Whether this is a special code: an adcode ending in two zero digits,
    /// marking a higher-level division that also has a `_full` boundary
    /// file with nested sub-region detail.
    pub fn is_special(&self) -> bool {
        self.adcode.ends_with("00")
    }

    /// Plan the downloads for this entry: always the normal file, plus the
    /// full file for special codes, in that order.
    pub fn plan(&self, base: &Url) -> Result<Vec<Download>> {
        let mut downloads = vec![Download::normal(base, &self.adcode)?];
        if self.is_special() {
            downloads.push(Download::full(base, &self.adcode)?);
        }
        Ok(downloads)
    }
}

/// Fetch the index document from the remote endpoint.
///
/// Order of entries is preserved from the source array.
pub async fn fetch_index(
    client: &ClientWithMiddleware,
    url: &Url,
) -> Result<Vec<RegionEntry>> {
    debug!("Fetching index from {}", url);
    let response = client.get(url.clone()).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    let entries: Vec<RegionEntry> = serde_json::from_slice(&body)?;
    debug!("Index lists {} regions", entries.len());
    Ok(entries)
}

/// Read the index document from a local file containing the same JSON
/// array shape as the remote endpoint.
pub async fn load_index(path: &Path) -> Result<Vec<RegionEntry>> {
    debug!("Reading index from {:?}", path);
    let body = tokio::fs::read(path).await?;
    let entries: Vec<RegionEntry> = serde_json::from_slice(&body)?;
    debug!("Index lists {} regions", entries.len());
    Ok(entries)
}
