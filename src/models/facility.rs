//! Facility candidates and classified matches.

use serde::{Deserialize, Serialize};

/// Raw point of interest as returned by the external query service.
/// Untyped and unvalidated until it passes the radius and name filters.
#[derive(Debug, Clone)]
pub struct FacilityCandidate {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Source tag as-is, e.g. "amenity=school".
    pub raw_type: String,
}

/// Facility classification derived from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityCategory {
    MiddleSchool,
    HighSchool,
    University,
    Other,
}

impl std::fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityCategory::MiddleSchool => write!(f, "middle_school"),
            FacilityCategory::HighSchool => write!(f, "high_school"),
            FacilityCategory::University => write!(f, "university"),
            FacilityCategory::Other => write!(f, "other"),
        }
    }
}

/// One (station, facility) pair within the search radius: one row of the
/// facility match table. A facility near several stations produces one row
/// per station; there is no cross-station dedup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityMatch {
    pub station: String,
    #[serde(rename = "school")]
    pub facility: String,
    pub distance_m: f64,
    #[serde(rename = "school_lat")]
    pub lat: f64,
    #[serde(rename = "school_lon")]
    pub lon: f64,
    pub category: FacilityCategory,
}
