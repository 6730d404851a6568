use serde::{Deserialize, Serialize};

pub const DEFAULT_ZOOM: f64 = 14.0;
pub const DEFAULT_MAX_POINTS: usize = 100;
pub const DEFAULT_BUFFER: f64 = 0.2;
pub const DEFAULT_MIN_ZOOM: f64 = 10.0;

/// Tuning for the viewport filter.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Hard cap on the number of points returned. `None` disables the cap.
    pub max_points: Option<usize>,
    /// Fractional margin added around the visible area.
    pub buffer: f64,
    /// Below this zoom the result is flagged; the filter does not enforce it.
    pub min_zoom: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            max_points: Some(DEFAULT_MAX_POINTS),
            buffer: DEFAULT_BUFFER,
            min_zoom: DEFAULT_MIN_ZOOM,
        }
    }
}

impl FilterOptions {
    pub fn with_max_points(mut self, max_points: Option<usize>) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self
    }
}
