//! Station records produced by the geocoder.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A resolved station: one row of the station coordinate table.
///
/// Immutable once produced; names are unique within a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StationRecord {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
