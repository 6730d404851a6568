use crate::geo::LatLng;

/// Squared Euclidean distance in degree space.
///
/// Treats lat/lng as planar coordinates. Adequate at city/region scale;
/// distorted near the poles and wrong across the antimeridian.
pub fn degree_distance_sq(a: LatLng, b: LatLng) -> f64 {
    let dlat = a.lat - b.lat;
    let dlng = a.lng - b.lng;
    dlat * dlat + dlng * dlng
}

pub fn degree_distance(a: LatLng, b: LatLng) -> f64 {
    degree_distance_sq(a, b).sqrt()
}

/// Arithmetic mean of a set of positions, `None` when empty.
pub fn centroid(points: impl IntoIterator<Item = LatLng>) -> Option<LatLng> {
    let mut n = 0usize;
    let mut lat = 0.0;
    let mut lng = 0.0;
    for p in points {
        n += 1;
        lat += p.lat;
        lng += p.lng;
    }
    if n == 0 {
        return None;
    }
    Some(LatLng::new(lat / n as f64, lng / n as f64))
}
