//! Narrow seam over the external map-data query service.
//!
//! The pipeline needs exactly two queries. Keeping the surface this small
//! lets the geocoder and the proximity search run against an in-memory fake
//! in tests, with no network involved.

pub mod client;
pub mod query;

pub use client::{OverpassClient, DEFAULT_ENDPOINT};

use async_trait::async_trait;

use crate::error::QueryError;
use crate::models::{FacilityCandidate, GeoPoint};

#[async_trait]
pub trait GeoQueryService: Send + Sync {
    /// Named-place lookup restricted to the given administrative regions.
    /// Returns every match; disambiguation is the caller's job.
    async fn geocode_place(
        &self,
        name: &str,
        regions: &[String],
    ) -> Result<Vec<GeoPoint>, QueryError>;

    /// Candidate facilities inside the bounding circle around `center`.
    /// Coarse pre-filter only: the service may return points slightly
    /// outside the true radius.
    async fn facilities_near(
        &self,
        center: GeoPoint,
        radius_m: f64,
        include_universities: bool,
    ) -> Result<Vec<FacilityCandidate>, QueryError>;
}
