//! KML overlay: station and match CSVs in, layered KML out.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ginkgo::config;
use ginkgo::models::FacilityMatch;
use ginkgo::overlay::{self, kml};
use ginkgo::report::RunSummary;
use ginkgo::tables;

#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(about = "Build a KML overlay of stations, search circles and schools")]
struct Args {
    /// Station coordinate CSV
    #[arg(short, long, default_value = "station_coordinates.csv")]
    stations: PathBuf,

    /// Facility match CSV produced by the search step
    #[arg(short, long, default_value = "schools_within_800m.csv")]
    matches: PathBuf,

    /// Output KML file
    #[arg(short, long, default_value = "stations_schools.kml")]
    output: PathBuf,

    /// Circle radius in metres (illustrative; should match the search run)
    #[arg(short, long, default_value_t = config::DEFAULT_RADIUS_M)]
    radius: f64,

    /// Vertices per radius circle
    #[arg(long, default_value_t = config::DEFAULT_SEGMENTS)]
    segments: usize,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    config::validate_radius(args.radius)?;
    config::validate_segments(args.segments)?;
    config::require_file(&args.stations)?;
    config::require_file(&args.matches)?;

    let mut summary = RunSummary::default();

    let station_read = tables::read_station_table(&args.stations)
        .context("Failed to read station table")?;
    summary.record_malformed(station_read.skipped);
    let stations = station_read.rows;

    let match_read = tables::read_table::<FacilityMatch>(&args.matches)
        .context("Failed to read match table")?;
    summary.record_malformed(match_read.skipped);

    // A match row must point at a station we are actually drawing.
    let known: HashSet<&str> = stations.iter().map(|s| s.name.as_str()).collect();
    let mut matches = Vec::with_capacity(match_read.rows.len());
    for m in match_read.rows {
        if known.contains(m.station.as_str()) {
            matches.push(m);
        } else {
            warn!(
                "match {:?} references unknown station {:?}, skipping",
                m.facility, m.station
            );
            summary.record_malformed(1);
        }
    }

    summary.processed = stations.len();
    summary.matches = matches.len();

    let document = overlay::render(&stations, &matches, args.radius, args.segments);
    fs::write(&args.output, kml::to_kml(&document)).context("Failed to write KML file")?;

    info!(
        "KML written to {} ({} stations, {} schools)",
        args.output.display(),
        document.station_markers.len(),
        document.facility_markers.len()
    );
    summary.log();

    Ok(())
}
