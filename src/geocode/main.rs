//! Station geocoding: name list in, coordinate CSV out.
//!
//! Each name is resolved with one Overpass query scoped to the configured
//! administrative regions. Ambiguous or failed names are reported and
//! skipped; the run never aborts over a single station.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ginkgo::config;
use ginkgo::error::GeocodeError;
use ginkgo::geocoder::Geocoder;
use ginkgo::overpass::{OverpassClient, DEFAULT_ENDPOINT};
use ginkgo::report::RunSummary;
use ginkgo::tables;

#[derive(Parser, Debug)]
#[command(name = "geocode")]
#[command(about = "Resolve station names to coordinates via Overpass")]
struct Args {
    /// Station name list, one name per line
    #[arg(short, long, default_value = "station_names.txt")]
    input: PathBuf,

    /// Output CSV of resolved stations
    #[arg(short, long, default_value = "station_coordinates.csv")]
    output: PathBuf,

    /// Administrative region (admin level 4) to search within; repeatable.
    /// Defaults to the four Kansai prefectures.
    #[arg(long = "region")]
    regions: Vec<String>,

    /// Overpass API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Delay after each query, in milliseconds
    #[arg(long, default_value = "100")]
    delay_ms: u64,

    /// Concurrent in-flight queries (results keep input order)
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Per-query timeout in seconds
    #[arg(long, default_value = "25")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    config::require_file(&args.input)?;
    if args.concurrency == 0 {
        return Err(ginkgo::error::ConfigError::InvalidConcurrency.into());
    }

    let regions = if args.regions.is_empty() {
        config::default_regions()
    } else {
        args.regions.clone()
    };

    let mut names =
        tables::read_name_list(&args.input).context("Failed to read station name list")?;

    // Station names must be unique in the output table.
    let before = names.len();
    let mut seen = HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
    if names.len() < before {
        warn!("{} duplicate names in the input list, ignoring repeats", before - names.len());
    }

    info!(
        "Geocoding {} stations within {}",
        names.len(),
        regions.join(", ")
    );

    let client = OverpassClient::new(&args.endpoint, args.timeout_secs);
    let geocoder = Geocoder::new(&client, regions);

    let total = names.len();
    let results = geocoder
        .resolve_all(&names, args.concurrency, Duration::from_millis(args.delay_ms))
        .await;

    let mut summary = RunSummary::default();
    let mut stations = Vec::new();
    for (index, (name, result)) in results.into_iter().enumerate() {
        match result {
            Ok(station) => {
                info!("{:3}/{} {} : OK", index + 1, total, name);
                stations.push(station);
            }
            Err(GeocodeError::Ambiguous { matches, .. }) => {
                warn!(
                    "{:3}/{} {} : {} matches, skipping",
                    index + 1,
                    total,
                    name,
                    matches
                );
                summary.record_ambiguous(&name);
            }
            Err(GeocodeError::Query(e)) => {
                warn!("{:3}/{} {} : query failed: {}", index + 1, total, name, e);
                summary.record_transient(&name);
            }
        }
    }
    summary.processed = stations.len();

    tables::write_table(&args.output, &stations).context("Failed to write station table")?;
    info!("Station table written to {}", args.output.display());
    summary.log();

    Ok(())
}
