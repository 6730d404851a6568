use crate::geo::LatLng;

/// Mean Earth radius (kilometers, IUGG).
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.008_8;

/// Length of one degree of latitude on the mean sphere (kilometers).
pub const KM_PER_DEGREE: f64 = EARTH_MEAN_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Great-circle distance between two positions (kilometers).
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let s = (dlat * 0.5).sin();
    let t = (dlng * 0.5).sin();
    let h = s * s + lat1.cos() * lat2.cos() * t * t;
    2.0 * EARTH_MEAN_RADIUS_KM * h.sqrt().min(1.0).asin()
}

pub fn degrees_to_km(degrees: f64) -> f64 {
    degrees * KM_PER_DEGREE
}

pub fn km_to_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}
