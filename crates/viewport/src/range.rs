use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use foundation::math::degrees_to_km;
use tracing::warn;

use crate::options::DEFAULT_ZOOM;

/// Zoom at which the detail factor saturates.
pub const MAX_DETAIL_ZOOM: f64 = 20.0;

/// Replaces a non-finite or non-positive zoom with the default.
pub fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        return zoom;
    }
    warn!(zoom, fallback = DEFAULT_ZOOM, "invalid zoom, using default");
    DEFAULT_ZOOM
}

/// Normalized detail in [0.01, 1]; higher zoom gives a value closer to 1.
pub fn zoom_factor(zoom: f64) -> f64 {
    (zoom / MAX_DETAIL_ZOOM).clamp(0.01, 1.0)
}

/// Widening applied to the box; larger when zoomed out.
pub fn range_multiplier(zoom: f64) -> f64 {
    ((1.0 - zoom_factor(zoom)) * 5.0).max(0.01)
}

/// Half-width of the square selection box, in degrees.
///
/// Non-increasing in `zoom` for a fixed, non-negative `buffer`.
pub fn range_for_zoom(zoom: f64, buffer: f64) -> f64 {
    let zoom = sanitize_zoom(zoom);
    range_multiplier(zoom) * (buffer + 1.0 / zoom)
}

pub fn bounds_for(center: LatLng, zoom: f64, buffer: f64) -> GeoBounds {
    GeoBounds::around(center, range_for_zoom(zoom, buffer))
}

/// Selection half-width expressed in kilometers, for data-fetch scoping.
pub fn fetch_radius_km(zoom: f64, buffer: f64) -> f64 {
    degrees_to_km(range_for_zoom(zoom, buffer))
}

#[cfg(test)]
mod tests {
    use super::{
        bounds_for, fetch_radius_km, range_for_zoom, range_multiplier, sanitize_zoom, zoom_factor,
    };
    use foundation::geo::LatLng;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zoom_factor_is_clamped() {
        assert_eq!(zoom_factor(0.0001), 0.01);
        assert_eq!(zoom_factor(10.0), 0.5);
        assert_eq!(zoom_factor(40.0), 1.0);
    }

    #[test]
    fn multiplier_floors_at_max_detail() {
        assert_eq!(range_multiplier(20.0), 0.01);
        assert_eq!(range_multiplier(25.0), 0.01);
        assert_close(range_multiplier(10.0), 2.5, 1e-12);
    }

    #[test]
    fn default_zoom_range() {
        // (1 - 0.7) * 5 * (0.2 + 1/14)
        assert_close(range_for_zoom(14.0, 0.2), 1.5 * (0.2 + 1.0 / 14.0), 1e-12);
    }

    #[test]
    fn range_never_grows_with_zoom() {
        for buffer in [0.0, 0.2, 1.0] {
            let mut prev = f64::INFINITY;
            let mut z = 0.5;
            while z <= 24.0 {
                let r = range_for_zoom(z, buffer);
                assert!(r <= prev, "range grew at zoom {z}: {prev} -> {r}");
                prev = r;
                z += 0.25;
            }
        }
    }

    #[test]
    fn max_detail_gives_tightest_box() {
        let tightest = range_for_zoom(20.0, 0.2);
        for z in [1.0, 5.0, 10.0, 14.0, 18.0, 19.5] {
            assert!(range_for_zoom(z, 0.2) > tightest);
        }
    }

    #[test]
    fn invalid_zoom_uses_default() {
        assert_eq!(sanitize_zoom(f64::NAN), 14.0);
        assert_eq!(sanitize_zoom(0.0), 14.0);
        assert_eq!(sanitize_zoom(-3.0), 14.0);
        assert_eq!(range_for_zoom(f64::INFINITY, 0.2), range_for_zoom(14.0, 0.2));
    }

    #[test]
    fn bounds_are_centered() {
        let c = LatLng::new(24.7136, 46.6753);
        let b = bounds_for(c, 14.0, 0.2);
        assert_close(b.center().lat, c.lat, 1e-12);
        assert_close(b.center().lng, c.lng, 1e-12);
        assert_close(b.lat_span(), 2.0 * range_for_zoom(14.0, 0.2), 1e-12);
    }

    #[test]
    fn fetch_radius_is_positive() {
        assert!(fetch_radius_km(14.0, 0.2) > 0.0);
        assert!(fetch_radius_km(10.0, 0.2) > fetch_radius_km(16.0, 0.2));
    }
}
