//! Batch address verification.
//!
//! Verifies addresses given on the command line and/or read from a file (one
//! per line) and prints one JSON line per address.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mapverify::config::Config;
use mapverify::{Envelope, Verifier};

#[derive(Parser, Debug)]
#[command(name = "verify")]
#[command(about = "Verify postal addresses against the map search")]
struct Args {
    /// Addresses to verify
    addresses: Vec<String>,

    /// File with one address per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of browser sessions run at once
    #[arg(long, default_value = "2")]
    concurrency: usize,
}

#[derive(Serialize)]
struct Line<'a> {
    address: &'a str,
    envelope: Envelope,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays JSON lines
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;

    let mut addresses = args.addresses.clone();
    if let Some(path) = &args.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read address file: {}", path.display()))?;
        addresses.extend(read_addresses(&content));
    }
    addresses.retain(|a| !a.trim().is_empty());

    if addresses.is_empty() {
        anyhow::bail!("No addresses given");
    }

    info!("Verifying {} addresses", addresses.len());

    let verifier = Verifier::new(&config);
    let mut results = stream::iter(addresses.iter())
        .map(|address| {
            let verifier = verifier.clone();
            async move { (address, verifier.verify(address).await) }
        })
        .buffer_unordered(args.concurrency.max(1));

    let mut summary: BTreeMap<&'static str, usize> = BTreeMap::new();
    while let Some((address, outcome)) = results.next().await {
        *summary.entry(outcome.label()).or_default() += 1;

        let line = Line {
            address,
            envelope: Envelope::from(outcome),
        };
        match serde_json::to_string(&line) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Failed to serialize result for {}: {}", address, e),
        }
    }

    for (label, count) in &summary {
        info!("{}: {}", label, count);
    }

    Ok(())
}

/// Non-blank, trimmed lines
fn read_addresses(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
