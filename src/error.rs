//! Error taxonomy for the pipeline.
//!
//! Per-item failures (one station, one CSV row) are reported and skipped;
//! only configuration problems abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the external query service. All variants are
/// transient from the pipeline's point of view: the client retries a bounded
/// number of times before surfacing one, and the affected station is then
/// skipped rather than aborting the batch.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures resolving a single station name.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Zero or multiple matches. The geocoder never picks one arbitrarily.
    #[error("name {name:?} matched {matches} places")]
    Ambiguous { name: String, matches: usize },

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Fatal configuration problems, detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("search radius must be a positive finite number of metres, got {0}")]
    InvalidRadius(f64),

    #[error("circle segments must be at least 8, got {0}")]
    InvalidSegments(usize),

    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("the precomputed facility source is not implemented; rerun without --offline")]
    OfflineUnsupported,
}

/// Failures reading or writing the tabular artifacts.
#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
