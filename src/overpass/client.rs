//! Overpass API client with bounded retry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{query, GeoQueryService};
use crate::error::QueryError;
use crate::models::{FacilityCandidate, GeoPoint};

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

const MAX_ATTEMPTS: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Blocking-free HTTP client for the Overpass interpreter endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    /// Server-side query timeout, also embedded in the QL header.
    timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl Element {
    /// Node coordinates, or the computed center for ways and relations.
    fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => self.center.as_ref().map(|c| GeoPoint::new(c.lat, c.lon)),
        }
    }
}

impl OverpassClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .user_agent("ginkgo/0.1 (station/school proximity search)")
                // A little headroom beyond the server-side timeout.
                .timeout(Duration::from_secs(timeout_secs + 5))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.to_string(),
            timeout_secs,
        }
    }

    async fn run_query(&self, ql: &str) -> Result<OverpassResponse, QueryError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.try_query(ql).await {
                Ok(response) => return Ok(response),
                Err(e) if attempts < MAX_ATTEMPTS => {
                    warn!(
                        "Overpass query failed (attempt {}/{}): {}",
                        attempts, MAX_ATTEMPTS, e
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_query(&self, ql: &str) -> Result<OverpassResponse, QueryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .body(ql.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QueryError::Status(response.status()));
        }

        let body = response.text().await?;
        let parsed = parse_response(&body)?;
        debug!("Overpass returned {} elements", parsed.elements.len());
        Ok(parsed)
    }
}

pub(crate) fn parse_response(body: &str) -> Result<OverpassResponse, serde_json::Error> {
    serde_json::from_str(body)
}

/// Coordinates of every element, rounded to 6 decimal places (~0.1 m, and
/// stable across reruns against unchanged data).
pub(crate) fn points_from(response: &OverpassResponse) -> Vec<GeoPoint> {
    response
        .elements
        .iter()
        .filter_map(Element::position)
        .map(|p| GeoPoint::new(round6(p.lat), round6(p.lon)))
        .collect()
}

/// Named elements as facility candidates. Unnamed elements and geometries
/// without a computable center are dropped.
pub(crate) fn candidates_from(response: &OverpassResponse) -> Vec<FacilityCandidate> {
    let mut out = Vec::new();
    for el in &response.elements {
        let Some(name) = el.tags.get("name") else {
            continue;
        };
        let Some(pos) = el.position() else {
            debug!("{} element {:?} has no center, skipping", el.kind, name);
            continue;
        };
        let raw_type = el
            .tags
            .get("amenity")
            .map(|a| format!("amenity={a}"))
            .unwrap_or_default();
        out.push(FacilityCandidate {
            name: name.clone(),
            lat: pos.lat,
            lon: pos.lon,
            raw_type,
        });
    }
    out
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

#[async_trait]
impl GeoQueryService for OverpassClient {
    async fn geocode_place(
        &self,
        name: &str,
        regions: &[String],
    ) -> Result<Vec<GeoPoint>, QueryError> {
        let ql = query::station_query(name, regions, self.timeout_secs);
        let response = self.run_query(&ql).await?;
        Ok(points_from(&response))
    }

    async fn facilities_near(
        &self,
        center: GeoPoint,
        radius_m: f64,
        include_universities: bool,
    ) -> Result<Vec<FacilityCandidate>, QueryError> {
        let ql = query::facility_query(center, radius_m, include_universities, self.timeout_secs);
        let response = self.run_query(&ql).await?;
        Ok(candidates_from(&response))
    }
}
