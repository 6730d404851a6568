use crate::geo::{LatLng, ScreenPoint, ScreenRect};

/// Pixel size of one tile at zoom 0.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Zoom level assumed by `LinearProjection::default()`.
pub const DEFAULT_PROJECTION_ZOOM: f64 = 13.0;

/// Converts between container pixels and geographic coordinates.
///
/// Handlers only talk to this trait, so the coarse linear mapping can be
/// swapped for a map SDK's real unprojection.
pub trait Projection {
    /// Geo position under `point`, for a map centered on `center` and drawn
    /// into `rect`.
    fn screen_to_geo(&self, point: ScreenPoint, rect: ScreenRect, center: LatLng) -> LatLng;

    fn geo_to_screen(&self, geo: LatLng, rect: ScreenRect, center: LatLng) -> ScreenPoint;
}

/// Fixed-scale linear mapping around the container center.
///
/// Uses the equatorial Web Mercator degrees-per-pixel at a fixed zoom for both
/// axes. Good enough to drop a bookmark near where the user pressed; not a
/// true unprojection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearProjection {
    pub zoom: f64,
}

impl Default for LinearProjection {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_PROJECTION_ZOOM,
        }
    }
}

impl LinearProjection {
    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    pub fn degrees_per_pixel(&self) -> f64 {
        360.0 / (TILE_SIZE_PX * self.zoom.exp2())
    }
}

impl Projection for LinearProjection {
    fn screen_to_geo(&self, point: ScreenPoint, rect: ScreenRect, center: LatLng) -> LatLng {
        let mid = rect.center();
        let dpp = self.degrees_per_pixel();
        // Screen y grows downwards.
        LatLng::new(
            center.lat - (point.y - mid.y) * dpp,
            center.lng + (point.x - mid.x) * dpp,
        )
    }

    fn geo_to_screen(&self, geo: LatLng, rect: ScreenRect, center: LatLng) -> ScreenPoint {
        let mid = rect.center();
        let dpp = self.degrees_per_pixel();
        ScreenPoint::new(
            mid.x + (geo.lng - center.lng) / dpp,
            mid.y - (geo.lat - center.lat) / dpp,
        )
    }
}
