use foundation::geo::LatLng;
use poi::TourId;
use serde::Serialize;

use crate::region::Region;

pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const ZOOM_IN_FACTOR: f64 = 0.7;
pub const ZOOM_OUT_FACTOR: f64 = 1.5;
pub const CLUSTER_ZOOM_FACTOR: f64 = 0.7;
/// Zoom-in never shrinks the radius below this.
pub const MIN_RADIUS_KM: f64 = 1.0;

/// Open bookmark-creation form, anchored at a map position.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BookmarkForm {
    pub position: LatLng,
}

/// Viewport state of one mounted map view.
///
/// Owned by the view and changed only through the handlers in
/// [`crate::handlers`], so there is a single writer at all times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapViewState {
    pub(crate) center: LatLng,
    pub(crate) zoom: f64,
    pub(crate) radius_km: f64,
    pub(crate) interactive: bool,
    pub(crate) active_tour: Option<TourId>,
    pub(crate) selected_poi: Option<String>,
    pub(crate) bookmark_form: Option<BookmarkForm>,
    pub(crate) last_region: Option<Region>,
}

impl MapViewState {
    pub fn new(center: LatLng, zoom: f64, radius_km: f64) -> Self {
        Self {
            center,
            zoom,
            radius_km,
            interactive: true,
            active_tour: None,
            selected_poi: None,
            bookmark_form: None,
            last_region: None,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn active_tour(&self) -> Option<&TourId> {
        self.active_tour.as_ref()
    }

    pub fn selected_poi(&self) -> Option<&str> {
        self.selected_poi.as_deref()
    }

    pub fn bookmark_form(&self) -> Option<&BookmarkForm> {
        self.bookmark_form.as_ref()
    }

    pub fn last_region(&self) -> Option<&Region> {
        self.last_region.as_ref()
    }

    /// Region describing the current center and radius.
    pub fn region(&self) -> Region {
        Region::new(self.center, self.radius_km)
    }
}
