//! Layered geographic overlay: station pins, radius circles, facility pins.

pub mod kml;

use crate::geometry;
use crate::models::{FacilityMatch, GeoPoint, StationRecord};

/// A labelled point placemark.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub description: Option<String>,
    pub point: GeoPoint,
}

/// A closed polygon ring (first vertex == last vertex).
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePolygon {
    pub name: String,
    pub ring: Vec<GeoPoint>,
}

/// The three layers of the rendered document. The circles illustrate the
/// search boundary; they are not the shape that was actually queried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayDocument {
    pub station_markers: Vec<Marker>,
    pub radius_circles: Vec<CirclePolygon>,
    pub facility_markers: Vec<Marker>,
}

/// Build the overlay. Deterministic: stations keep their input order,
/// facilities keep match order, circle vertices walk clockwise from north.
pub fn render(
    stations: &[StationRecord],
    matches: &[FacilityMatch],
    radius_m: f64,
    segments: usize,
) -> OverlayDocument {
    let mut doc = OverlayDocument::default();

    for station in stations {
        doc.station_markers.push(Marker {
            name: station.name.clone(),
            description: None,
            point: station.point(),
        });
        doc.radius_circles.push(CirclePolygon {
            name: format!("{} {:.0}m radius", station.name, radius_m),
            ring: geometry::circle_ring(station.point(), radius_m, segments),
        });
    }

    for m in matches {
        doc.facility_markers.push(Marker {
            name: m.facility.clone(),
            description: Some(format!("{:.1} m from {}", m.distance_m, m.station)),
            point: GeoPoint::new(m.lat, m.lon),
        });
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FacilityCategory;

    fn umeda() -> StationRecord {
        StationRecord {
            name: "梅田".to_string(),
            latitude: 34.7024,
            longitude: 135.4959,
        }
    }

    fn one_match() -> FacilityMatch {
        FacilityMatch {
            station: "梅田".to_string(),
            facility: "○○中学校".to_string(),
            distance_m: 750.0,
            lat: 34.7079,
            lon: 135.4975,
            category: FacilityCategory::MiddleSchool,
        }
    }

    #[test]
    fn test_one_station_one_match() {
        let doc = render(&[umeda()], &[one_match()], 800.0, 48);

        assert_eq!(doc.station_markers.len(), 1);
        assert_eq!(doc.radius_circles.len(), 1);
        assert_eq!(doc.facility_markers.len(), 1);

        assert_eq!(doc.station_markers[0].name, "梅田");

        let ring = &doc.radius_circles[0].ring;
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring.len(), 49);

        let label = doc.facility_markers[0].description.as_deref().unwrap();
        assert!(label.contains("梅田"));
        assert!(label.contains("750"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let stations = [umeda()];
        let matches = [one_match()];
        let a = render(&stations, &matches, 800.0, 48);
        let b = render(&stations, &matches, 800.0, 48);
        assert_eq!(a, b);
    }

    #[test]
    fn test_layer_sizes_track_inputs() {
        let mut namba = umeda();
        namba.name = "難波".to_string();
        let doc = render(&[umeda(), namba], &[], 800.0, 32);
        assert_eq!(doc.station_markers.len(), 2);
        assert_eq!(doc.radius_circles.len(), 2);
        assert!(doc.facility_markers.is_empty());
        assert_eq!(doc.radius_circles[1].name, "難波 800m radius");
    }
}
