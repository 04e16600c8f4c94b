//! Spherical geometry on a fixed-radius Earth.

use crate::models::GeoPoint;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle (haversine) distance in metres between two points.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}

/// Point reached by travelling `distance_m` along `bearing_deg` from
/// `origin` on the great circle.
pub fn destination_point(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let ang = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * ang.cos() + lat1.cos() * ang.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * ang.sin() * lat1.cos()).atan2(ang.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Closed ring approximating a circle of `radius_m` around `center`:
/// `segments` evenly spaced bearings starting due north, then the first
/// vertex repeated so the ring closes exactly.
pub fn circle_ring(center: GeoPoint, radius_m: f64, segments: usize) -> Vec<GeoPoint> {
    let mut ring: Vec<GeoPoint> = (0..segments)
        .map(|i| destination_point(center, i as f64 * 360.0 / segments as f64, radius_m))
        .collect();
    ring.push(ring[0]);
    ring
}
