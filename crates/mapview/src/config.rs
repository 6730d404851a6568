use foundation::geo::LatLng;
use foundation::math::DEFAULT_PROJECTION_ZOOM;
use serde::{Deserialize, Serialize};
use viewport::{DEFAULT_ZOOM, FilterOptions};

use crate::region::DedupPolicy;
use crate::state::DEFAULT_RADIUS_KM;

/// Riyadh city center, where a fresh view opens.
pub const DEFAULT_CENTER: LatLng = LatLng::new(24.7136, 46.6753);

/// Roughly one animation frame at 60 Hz.
pub const DEFAULT_CAMERA_INTERVAL_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapViewConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub radius_km: f64,
    pub interactive: bool,
    pub dedup: DedupPolicy,
    /// Ceiling for zoom-out. `None` lets the radius grow without bound.
    pub max_radius_km: Option<f64>,
    pub camera_interval_ms: u64,
    pub projection_zoom: f64,
    pub filter: FilterOptions,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            radius_km: DEFAULT_RADIUS_KM,
            interactive: true,
            dedup: DedupPolicy::Never,
            max_radius_km: None,
            camera_interval_ms: DEFAULT_CAMERA_INTERVAL_MS,
            projection_zoom: DEFAULT_PROJECTION_ZOOM,
            filter: FilterOptions::default(),
        }
    }
}
