//! JSON minification.
//!
//! Walks an input directory tree, re-serializes every `.json` file it
//! finds with no extraneous whitespace, and writes the results into a flat
//! output directory. Subdirectory structure is discarded, so two files
//! with the same basename in different subdirectories collide and the
//! later one wins. Failures are isolated per file: a malformed document is
//! reported and the walk continues.
//!
//! # Examples
//!
//! ```rust,no_run
//! use geobound::minify::minify_dir;
//! use std::path::Path;
//!
//! # fn example() -> geobound::Result<()> {
//! let report = minify_dir(Path::new("dist"), Path::new("compressed"))?;
//! println!("{} files compressed, {} failed", report.written.len(), report.failed.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of one minification walk, in walk order.
#[derive(Debug, Clone, Default)]
pub struct MinifyReport {
    /// Basenames written into the output directory.
    pub written: Vec<String>,
    /// Input paths that failed to parse or to be written.
    pub failed: Vec<String>,
}

/// Recursively minify every `.json` file under `input` into `output`.
///
/// A missing input root is reported and yields an empty report; it is not
/// an error. Creating the output directory is the only fatal failure.
pub fn minify_dir(input: &Path, output: &Path) -> Result<MinifyReport> {
    if !input.exists() {
        info!("Input directory {} does not exist", input.display());
        return Ok(MinifyReport::default());
    }

    fs::create_dir_all(output)?;

    let mut report = MinifyReport::default();
    for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(".json") {
            continue;
        }

        match minify_file(entry.path(), output) {
            Ok(filename) => {
                debug!("Compressed: {} -> {}", filename, output.display());
                report.written.push(filename);
            }
            Err(e) => {
                warn!("Failed to compress {}: {}", entry.path().display(), e);
                report.failed.push(entry.path().display().to_string());
            }
        }
    }

    Ok(report)
}

/// Minify a single file into the output directory, flattened to its
/// basename. Returns the basename written.
fn minify_file(input: &Path, output_dir: &Path) -> Result<String> {
    let body = fs::read(input)?;
    let value: serde_json::Value = serde_json::from_slice(&body)?;

    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Internal(format!("{} has no file name", input.display())))?;

    let compact = serde_json::to_vec(&value)?;
    fs::write(output_dir.join(&filename), compact)?;
    Ok(filename)
}
