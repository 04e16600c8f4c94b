//! Proximity search: station CSV in, facility match CSV out.
//!
//! One Overpass query per station, a politeness delay in between. A failed
//! query yields zero matches for that station and is reported at the end.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ginkgo::aggregate::aggregate;
use ginkgo::config::{self, SearchConfig};
use ginkgo::overpass::{OverpassClient, DEFAULT_ENDPOINT};
use ginkgo::proximity::ProximitySearch;
use ginkgo::report::RunSummary;
use ginkgo::tables;

#[derive(Parser, Debug)]
#[command(name = "search")]
#[command(about = "Find schools within a radius of each station")]
struct Args {
    /// Station coordinate CSV
    #[arg(short, long, default_value = "station_coordinates.csv")]
    stations: PathBuf,

    /// Search radius in metres
    #[arg(short, long, default_value_t = config::DEFAULT_RADIUS_M)]
    radius: f64,

    /// Output CSV; defaults to schools_within_{radius}m.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use a precomputed facility table instead of live queries
    /// (not implemented; the flag exists for interface completeness)
    #[arg(long)]
    offline: bool,

    /// Also keep facilities whose name contains 大学
    #[arg(long)]
    include_universities: bool,

    /// Overpass API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Delay between per-station queries, in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// Per-query timeout in seconds
    #[arg(long, default_value = "60")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Configuration problems are fatal before the first network call.
    let search_config = SearchConfig {
        radius_m: args.radius,
        live: !args.offline,
        include_universities: args.include_universities,
        delay_ms: args.delay_ms,
        concurrency: 1,
    };
    search_config.validate()?;
    config::require_file(&args.stations)?;

    let mut summary = RunSummary::default();

    let read = tables::read_station_table(&args.stations)
        .context("Failed to read station table")?;
    summary.record_malformed(read.skipped);
    let stations = read.rows;
    info!(
        "Searching {} m around {} stations",
        search_config.radius_m,
        stations.len()
    );

    let client = OverpassClient::new(&args.endpoint, args.timeout_secs);
    let search = ProximitySearch::new(
        &client,
        search_config.radius_m,
        search_config.include_universities,
    );

    let mut groups = Vec::with_capacity(stations.len());
    for (index, station) in stations.iter().enumerate() {
        match search.search(station).await {
            Ok(matches) => {
                info!(
                    "{:3}/{} {} : {} matches",
                    index + 1,
                    stations.len(),
                    station.name,
                    matches.len()
                );
                summary.processed += 1;
                groups.push(matches);
            }
            Err(e) => {
                warn!("{} : query failed, skipping: {}", station.name, e);
                summary.record_transient(&station.name);
                groups.push(Vec::new());
            }
        }
        if index + 1 < stations.len() {
            tokio::time::sleep(Duration::from_millis(search_config.delay_ms)).await;
        }
    }

    let rows = aggregate(groups);
    summary.matches = rows.len();

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!("schools_within_{:.0}m.csv", search_config.radius_m))
    });
    tables::write_table(&output, &rows).context("Failed to write match table")?;
    info!(
        "{} pairs written to {} (radius {} m)",
        rows.len(),
        output.display(),
        search_config.radius_m
    );
    summary.log();

    Ok(())
}
