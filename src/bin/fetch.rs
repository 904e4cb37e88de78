//! geobound-fetch - bulk download administrative boundary JSON files.
//!
//! Acquires the region index (network or local file), downloads every
//! planned boundary file sequentially into the output directory, and runs
//! a single retry pass over the failures. Index acquisition failure is
//! fatal; per-file failures are reported and leave the exit status at
//! zero.

use anyhow::Context;
use clap::Parser;
use geobound::downloader::{DownloaderBuilder, FetchMode, Outcome};
use geobound::http::{create_http_client, HttpClientConfig};
use geobound::index::{fetch_index, load_index, RegionEntry, DEFAULT_BASE_URL};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "geobound-fetch",
    version,
    about = "Bulk download administrative boundary JSON files"
)]
struct Args {
    /// Read the region index from a local file instead of the network
    #[arg(short, long)]
    index: Option<PathBuf>,

    /// Directory receiving the downloaded files
    #[arg(short, long, default_value = "dist")]
    output: PathBuf,

    /// Base URL under which the boundary files live
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Stream responses straight to disk instead of buffering and re-indenting
    #[arg(long)]
    stream: bool,

    /// Seconds to pause after each streamed download
    #[arg(long, default_value_t = 1)]
    delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Hide the progress bars
    #[arg(short, long)]
    quiet: bool,
}

async fn acquire_index(args: &Args) -> anyhow::Result<Vec<RegionEntry>> {
    match &args.index {
        Some(path) => {
            println!("Reading {}...", path.display());
            let entries = load_index(path)
                .await
                .with_context(|| format!("failed to read index {}", path.display()))?;
            println!("Read {} successfully", path.display());
            Ok(entries)
        }
        None => {
            let raw = format!("{}/all.json", args.base_url.as_str().trim_end_matches('/'));
            let index_url = Url::parse(&raw)?;
            let client = create_http_client(HttpClientConfig {
                timeout: Duration::from_secs(args.timeout),
                ..HttpClientConfig::default()
            })?;
            println!("Downloading all.json...");
            let entries = fetch_index(&client, &index_url)
                .await
                .context("failed to download the region index")?;
            println!("Downloaded all.json successfully");
            Ok(entries)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geobound=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Index acquisition failure aborts the run with a non-zero exit.
    let entries = acquire_index(&args).await?;

    let builder = if args.quiet {
        DownloaderBuilder::hidden()
    } else {
        DownloaderBuilder::new()
    };
    let downloader = builder
        .directory(args.output)
        .base_url(args.base_url)
        .fetch_mode(if args.stream {
            FetchMode::Streamed
        } else {
            FetchMode::Buffered
        })
        .throttle(Duration::from_secs(args.delay))
        .timeout(Duration::from_secs(args.timeout))
        .build();

    match downloader.run(&entries).await? {
        Outcome::AllSucceeded => println!("All downloads completed successfully"),
        Outcome::SucceededAfterRetry => {
            println!("All failed downloads were successful on retry")
        }
        Outcome::PartiallyFailed { remaining } => {
            println!("Failed downloads after retry: {}", remaining.join(", "))
        }
    }

    // Per-file failures leave the exit status at zero.
    Ok(())
}
