//! Ginkgo - locate schools near rail stations and render them as a KML overlay.
//!
//! The pipeline: a station name list is geocoded via Overpass into a
//! coordinate table, each station is searched for nearby schools, the
//! per-station matches are merged into one ordered table, and stations,
//! search circles and matched schools are rendered as a layered KML file.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod geometry;
pub mod models;
pub mod overlay;
pub mod overpass;
pub mod proximity;
pub mod report;
pub mod tables;

pub use models::{FacilityCandidate, FacilityCategory, FacilityMatch, GeoPoint, StationRecord};
