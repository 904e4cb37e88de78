//! Core download target functionality.
//!
//! This module contains the [`Download`] struct describing one boundary
//! file to fetch: its URL, the file name used on disk, and the adcode of
//! the region it belongs to. Failure bookkeeping is keyed by adcode, which
//! is why every target carries one.
//!
//! # Examples
//!
//! ```rust
//! use geobound::download::Download;
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let base = Url::parse("https://geo.datav.aliyun.com/areas_v3/bound")?;
//! let normal = Download::normal(&base, "110101")?;
//! assert_eq!(normal.filename, "110101.json");
//!
//! let full = Download::full(&base, "110000")?;
//! assert_eq!(full.filename, "110000_full.json");
//! assert_eq!(full.adcode, "110000");
//! # Ok(())
//! # }
//! ```

use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;

/// Represents a file to be downloaded.
#[derive(Debug, Clone)]
pub struct Download {
    /// URL of the file to download.
    pub url: Url,
    /// File name used to save the file on disk.
    pub filename: String,
    /// Administrative code of the region this file belongs to.
    pub adcode: String,
}

impl Download {
    /// Creates a new [`Download`].
    pub fn new(url: &Url, filename: &str, adcode: &str) -> Self {
        Self {
            url: url.clone(),
            filename: String::from(filename),
            adcode: String::from(adcode),
        }
    }

    /// Creates the normal boundary target for an adcode: `<base>/<adcode>.json`.
    pub fn normal(base: &Url, adcode: &str) -> Result<Self, Error> {
        Self::for_variant(base, adcode, "")
    }

    /// Creates the full boundary target for an adcode: `<base>/<adcode>_full.json`.
    ///
    /// Only meaningful for special codes (adcodes ending in `"00"`); the
    /// caller decides whether to plan it.
    pub fn full(base: &Url, adcode: &str) -> Result<Self, Error> {
        Self::for_variant(base, adcode, "_full")
    }

    fn for_variant(base: &Url, adcode: &str, suffix: &str) -> Result<Self, Error> {
        let filename = format!("{}{}.json", adcode, suffix);
        let raw = format!("{}/{}", base.as_str().trim_end_matches('/'), filename);
        let url = Url::parse(&raw)
            .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", raw, e)))?;
        Ok(Self {
            url,
            filename,
            adcode: String::from(adcode),
        })
    }
}

/// Derive the owning adcode from a boundary file name.
///
/// `110000_full.json` and `110000.json` both map to `110000`. Names that do
/// not follow the boundary pattern are used as-is.
fn adcode_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".json").unwrap_or(filename);
    stem.strip_suffix("_full").unwrap_or(stem).to_string()
}

impl TryFrom<&Url> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        value
            .path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!(
                    "The url \"{}\" does not contain a valid path",
                    value
                ))
            })?
            .next_back()
            .map(String::from)
            .map(|filename| {
                let filename: String = form_urlencoded::parse(filename.as_bytes())
                    .map(|(key, val)| [key, val].concat())
                    .collect();
                Download {
                    url: value.clone(),
                    adcode: adcode_from_filename(&filename),
                    filename,
                }
            })
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })
    }
}

impl TryFrom<&str> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Download::try_from(&u))
    }
}
