//! KML serialization of the overlay document.
//!
//! Three shared styles, placemarks referencing them by `styleUrl`.
//! Coordinates use Rust's shortest round-trip float formatting, so the file
//! is byte-identical across runs for identical inputs.

use crate::models::GeoPoint;

use super::{CirclePolygon, Marker, OverlayDocument};

/// Red paddle icon, scaled up so stations stand out.
const STATION_ICON: &str = "http://maps.google.com/mapfiles/kml/paddle/red-circle.png";
const STATION_SCALE: &str = "1.2";

/// Yellow blank paddle, scaled down, for facility pins.
const FACILITY_ICON: &str = "http://maps.google.com/mapfiles/kml/paddle/ylw-blank.png";
const FACILITY_SCALE: &str = "0.8";

/// Circle fill: blue at alpha 60/255, KML aabbggrr order.
const CIRCLE_COLOR: &str = "3cff0000";

pub fn to_kml(doc: &OverlayDocument) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n<Document>\n");

    write_icon_style(&mut out, "station", STATION_ICON, STATION_SCALE);
    write_icon_style(&mut out, "facility", FACILITY_ICON, FACILITY_SCALE);
    out.push_str(&format!(
        "<Style id=\"circle\"><PolyStyle><color>{CIRCLE_COLOR}</color></PolyStyle></Style>\n"
    ));

    for marker in &doc.station_markers {
        write_marker(&mut out, marker, "station");
    }
    for circle in &doc.radius_circles {
        write_circle(&mut out, circle);
    }
    for marker in &doc.facility_markers {
        write_marker(&mut out, marker, "facility");
    }

    out.push_str("</Document>\n</kml>\n");
    out
}

fn write_icon_style(out: &mut String, id: &str, href: &str, scale: &str) {
    out.push_str(&format!(
        "<Style id=\"{id}\"><IconStyle><scale>{scale}</scale>\
         <Icon><href>{href}</href></Icon></IconStyle></Style>\n"
    ));
}

fn write_marker(out: &mut String, marker: &Marker, style_id: &str) {
    out.push_str("<Placemark>");
    push_tag(out, "name", &marker.name);
    if let Some(description) = &marker.description {
        push_tag(out, "description", description);
    }
    out.push_str(&format!("<styleUrl>#{style_id}</styleUrl>"));
    out.push_str(&format!(
        "<Point><coordinates>{}</coordinates></Point>",
        coord(marker.point)
    ));
    out.push_str("</Placemark>\n");
}

fn write_circle(out: &mut String, circle: &CirclePolygon) {
    out.push_str("<Placemark>");
    push_tag(out, "name", &circle.name);
    out.push_str("<styleUrl>#circle</styleUrl>");
    out.push_str("<Polygon><outerBoundaryIs><LinearRing><coordinates>");
    let vertices: Vec<String> = circle.ring.iter().map(|p| coord(*p)).collect();
    out.push_str(&vertices.join(" "));
    out.push_str("</coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark>\n");
}

/// KML coordinate order is lon,lat.
fn coord(p: GeoPoint) -> String {
    format!("{},{}", p.lon, p.lat)
}

fn push_tag(out: &mut String, tag: &str, text: &str) {
    out.push_str(&format!("<{tag}>{}</{tag}>", escape_xml(text)));
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilityCategory, FacilityMatch, StationRecord};
    use crate::overlay::render;

    fn sample_doc() -> OverlayDocument {
        let station = StationRecord {
            name: "梅田".to_string(),
            latitude: 34.7024,
            longitude: 135.4959,
        };
        let m = FacilityMatch {
            station: "梅田".to_string(),
            facility: "○○中学校".to_string(),
            distance_m: 750.0,
            lat: 34.7079,
            lon: 135.4975,
            category: FacilityCategory::MiddleSchool,
        };
        render(&[station], &[m], 800.0, 48)
    }

    #[test]
    fn test_kml_structure() {
        let kml = to_kml(&sample_doc());

        assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(kml.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));
        assert_eq!(kml.matches("<Placemark>").count(), 3);
        assert_eq!(kml.matches("<styleUrl>#station</styleUrl>").count(), 1);
        assert_eq!(kml.matches("<styleUrl>#circle</styleUrl>").count(), 1);
        assert_eq!(kml.matches("<styleUrl>#facility</styleUrl>").count(), 1);
        assert!(kml.contains("<color>3cff0000</color>"));
        assert!(kml.contains("<description>750.0 m from 梅田</description>"));
        assert!(kml.ends_with("</kml>\n"));
    }

    #[test]
    fn test_marker_coordinates_full_precision() {
        let kml = to_kml(&sample_doc());
        // lon,lat order, unrounded.
        assert!(kml.contains("<coordinates>135.4959,34.7024</coordinates>"));
    }

    #[test]
    fn test_ring_serialized_closed() {
        let doc = sample_doc();
        let kml = to_kml(&doc);
        let first = coord(doc.radius_circles[0].ring[0]);
        let ring_text = kml
            .split("<LinearRing><coordinates>")
            .nth(1)
            .and_then(|s| s.split("</coordinates>").next())
            .unwrap();
        assert!(ring_text.starts_with(&first));
        assert!(ring_text.ends_with(&first));
        assert_eq!(ring_text.split(' ').count(), 49);
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(to_kml(&sample_doc()), to_kml(&sample_doc()));
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(escape_xml("A&B <学校>"), "A&amp;B &lt;学校&gt;");
    }
}
