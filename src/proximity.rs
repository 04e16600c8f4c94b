//! Radius filtering and name-based classification of facility candidates.

use tracing::debug;

use crate::error::QueryError;
use crate::geometry;
use crate::models::{FacilityCandidate, FacilityCategory, FacilityMatch, GeoPoint, StationRecord};
use crate::overpass::GeoQueryService;

/// Classify a facility by name substring, in fixed priority order:
/// 高等学校 before 中学校, so a combined school ("○○中学校・高等学校")
/// counts as a high school; 大学 last and only when enabled, so an attached
/// school ("○○大学附属中学校") stays a middle school. `None` means the
/// facility is excluded.
pub fn classify(name: &str, include_universities: bool) -> Option<FacilityCategory> {
    if name.contains("高等学校") {
        Some(FacilityCategory::HighSchool)
    } else if name.contains("中学校") {
        Some(FacilityCategory::MiddleSchool)
    } else if include_universities && name.contains("大学") {
        Some(FacilityCategory::University)
    } else {
        None
    }
}

/// Exact filter over the coarse query results. The haversine distance is
/// authoritative: anything beyond `radius_m` is rejected even if the service
/// returned it (the boundary itself is inclusive). Identically named
/// candidates are kept as separate matches.
pub fn filter_and_classify(
    station: &StationRecord,
    candidates: &[FacilityCandidate],
    radius_m: f64,
    include_universities: bool,
) -> Vec<FacilityMatch> {
    let center = station.point();
    let mut matches = Vec::new();
    for candidate in candidates {
        let Some(category) = classify(&candidate.name, include_universities) else {
            continue;
        };
        let distance = geometry::haversine_m(center, GeoPoint::new(candidate.lat, candidate.lon));
        if distance > radius_m {
            continue;
        }
        matches.push(FacilityMatch {
            station: station.name.clone(),
            facility: candidate.name.clone(),
            distance_m: (distance * 10.0).round() / 10.0,
            lat: candidate.lat,
            lon: candidate.lon,
            category,
        });
    }
    matches
}

/// Per-station proximity search over a query service.
pub struct ProximitySearch<'s, S> {
    service: &'s S,
    radius_m: f64,
    include_universities: bool,
}

impl<'s, S: GeoQueryService> ProximitySearch<'s, S> {
    pub fn new(service: &'s S, radius_m: f64, include_universities: bool) -> Self {
        Self {
            service,
            radius_m,
            include_universities,
        }
    }

    /// All matching facilities around one station. An empty result is not an
    /// error; a query failure is returned for the caller to record and skip.
    pub async fn search(&self, station: &StationRecord) -> Result<Vec<FacilityMatch>, QueryError> {
        let candidates = self
            .service
            .facilities_near(station.point(), self.radius_m, self.include_universities)
            .await?;
        debug!("{}: {} raw candidates", station.name, candidates.len());
        Ok(filter_and_classify(
            station,
            &candidates,
            self.radius_m,
            self.include_universities,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{destination_point, haversine_m};
    use async_trait::async_trait;

    fn umeda() -> StationRecord {
        StationRecord {
            name: "梅田".to_string(),
            latitude: 34.7024,
            longitude: 135.4959,
        }
    }

    fn candidate_at(station: &StationRecord, bearing: f64, distance_m: f64, name: &str) -> FacilityCandidate {
        let p = destination_point(station.point(), bearing, distance_m);
        FacilityCandidate {
            name: name.to_string(),
            lat: p.lat,
            lon: p.lon,
            raw_type: "amenity=school".to_string(),
        }
    }

    #[test]
    fn test_classification_rule_table() {
        assert_eq!(
            classify("大阪市立扇町中学校", false),
            Some(FacilityCategory::MiddleSchool)
        );
        assert_eq!(
            classify("北野高等学校", false),
            Some(FacilityCategory::HighSchool)
        );
        assert_eq!(classify("扇町小学校", false), None);
        assert_eq!(classify("ピアノ教室", false), None);
    }

    #[test]
    fn test_combined_school_classifies_as_high_school() {
        // 高等学校 takes priority when both tokens appear.
        assert_eq!(
            classify("金蘭会中学校・高等学校", false),
            Some(FacilityCategory::HighSchool)
        );
    }

    #[test]
    fn test_university_only_when_enabled() {
        assert_eq!(classify("大阪大学", false), None);
        assert_eq!(classify("大阪大学", true), Some(FacilityCategory::University));
        // An attached middle school is a middle school, not a university.
        assert_eq!(
            classify("○○大学附属中学校", true),
            Some(FacilityCategory::MiddleSchool)
        );
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let station = umeda();
        let boundary = candidate_at(&station, 90.0, 800.0, "境界中学校");
        let exact = haversine_m(
            station.point(),
            GeoPoint::new(boundary.lat, boundary.lon),
        );

        // A facility at a distance exactly equal to the radius is included.
        let matches = filter_and_classify(&station, &[boundary.clone()], exact, false);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].facility, "境界中学校");

        // Any radius short of that distance excludes it.
        let matches = filter_and_classify(&station, &[boundary], exact - 1e-4, false);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_matches_satisfy_radius_invariant() {
        let station = umeda();
        let candidates: Vec<FacilityCandidate> = [100.0, 400.0, 750.0, 799.9]
            .iter()
            .enumerate()
            .map(|(i, d)| candidate_at(&station, i as f64 * 73.0, *d, "某中学校"))
            .collect();

        let matches = filter_and_classify(&station, &candidates, 800.0, false);
        assert_eq!(matches.len(), 4);
        for m in &matches {
            let d = haversine_m(station.point(), GeoPoint::new(m.lat, m.lon));
            assert!(d <= 800.0 * (1.0 + 1e-6));
            assert!(m.distance_m <= 800.0);
        }
    }

    #[test]
    fn test_identical_names_are_not_deduped() {
        let station = umeda();
        let a = candidate_at(&station, 0.0, 200.0, "第一中学校");
        let b = candidate_at(&station, 180.0, 300.0, "第一中学校");

        let matches = filter_and_classify(&station, &[a, b], 800.0, false);
        assert_eq!(matches.len(), 2);
    }

    /// Fake source for the end-to-end scenario: two facilities, one inside
    /// and one outside the radius.
    struct FixedSource {
        candidates: Vec<FacilityCandidate>,
    }

    #[async_trait]
    impl GeoQueryService for FixedSource {
        async fn geocode_place(
            &self,
            _name: &str,
            _regions: &[String],
        ) -> Result<Vec<GeoPoint>, QueryError> {
            Ok(Vec::new())
        }

        async fn facilities_near(
            &self,
            _center: GeoPoint,
            _radius_m: f64,
            _include_universities: bool,
        ) -> Result<Vec<FacilityCandidate>, QueryError> {
            Ok(self.candidates.clone())
        }
    }

    #[tokio::test]
    async fn test_umeda_scenario() {
        let station = umeda();
        let source = FixedSource {
            candidates: vec![
                candidate_at(&station, 45.0, 750.0, "○○中学校"),
                candidate_at(&station, 210.0, 900.0, "△△高等学校"),
            ],
        };
        let search = ProximitySearch::new(&source, 800.0, false);

        let matches = search.search(&station).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].station, "梅田");
        assert_eq!(matches[0].facility, "○○中学校");
        assert_eq!(matches[0].distance_m, 750.0);
        assert_eq!(matches[0].category, FacilityCategory::MiddleSchool);
    }
}
