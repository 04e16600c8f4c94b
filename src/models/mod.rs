//! Core data models for the proximity pipeline.

pub mod facility;
pub mod station;

pub use facility::{FacilityCandidate, FacilityCategory, FacilityMatch};
pub use station::{GeoPoint, StationRecord};
