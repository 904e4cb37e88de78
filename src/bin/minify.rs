//! geobound-minify - compact a directory of JSON files.
//!
//! Walks the input directory recursively and writes every JSON file it
//! finds, re-serialized without extraneous whitespace, into a flat output
//! directory. Per-file failures are reported and never abort the walk.

use clap::Parser;
use geobound::minify::minify_dir;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "geobound-minify",
    version,
    about = "Minify a directory of JSON files"
)]
struct Args {
    /// Directory containing the original JSON files
    #[arg(short, long, default_value = "dist")]
    input: PathBuf,

    /// Directory receiving the minified files
    #[arg(short, long, default_value = "compressed")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geobound=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let report = minify_dir(&args.input, &args.output)?;

    println!(
        "Compressed {} JSON files from {} into {}",
        report.written.len(),
        args.input.display(),
        args.output.display()
    );
    if !report.failed.is_empty() {
        println!("Failed to compress {} files:", report.failed.len());
        for path in &report.failed {
            println!("  {}", path);
        }
    }

    Ok(())
}
