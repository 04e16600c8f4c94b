//! Station-name resolution against a fixed administrative region set.

use std::time::Duration;

use futures::StreamExt;
use tracing::debug;

use crate::error::GeocodeError;
use crate::models::StationRecord;
use crate::overpass::GeoQueryService;

pub struct Geocoder<'s, S> {
    service: &'s S,
    regions: Vec<String>,
}

impl<'s, S: GeoQueryService> Geocoder<'s, S> {
    pub fn new(service: &'s S, regions: Vec<String>) -> Self {
        Self { service, regions }
    }

    /// Resolve one name to a station record.
    ///
    /// Zero or multiple hits are an error: picking an arbitrary match would
    /// silently misplace the station, so ambiguity is surfaced instead.
    pub async fn resolve(&self, name: &str) -> Result<StationRecord, GeocodeError> {
        let points = self.service.geocode_place(name, &self.regions).await?;
        debug!("{}: {} geocode matches", name, points.len());
        match points.as_slice() {
            [point] => Ok(StationRecord {
                name: name.to_string(),
                latitude: point.lat,
                longitude: point.lon,
            }),
            _ => Err(GeocodeError::Ambiguous {
                name: name.to_string(),
                matches: points.len(),
            }),
        }
    }

    /// Resolve a whole list. Results come back in input order regardless of
    /// how many queries are in flight; per-name failures are returned
    /// alongside the successes so the caller can report them.
    pub async fn resolve_all(
        &self,
        names: &[String],
        concurrency: usize,
        delay: Duration,
    ) -> Vec<(String, Result<StationRecord, GeocodeError>)> {
        futures::stream::iter(names.iter().cloned())
            .map(|name| async move {
                let result = self.resolve(&name).await;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (name, result)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
