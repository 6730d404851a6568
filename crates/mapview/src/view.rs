use bookmarks::{Bookmark, BookmarkStore, InMemoryBookmarkStore};
use foundation::geo::{LatLng, ScreenPoint, ScreenRect};
use foundation::math::{LinearProjection, Projection};
use foundation::time::{Clock, SystemClock, Timestamp};
use poi::{PoiSet, PointOfInterest};
use serde::Serialize;
use viewport::{ViewportFilter, VisiblePoints};

use crate::camera::{CameraFeed, CameraUpdate};
use crate::cluster::Cluster;
use crate::config::MapViewConfig;
use crate::error::MapViewError;
use crate::handlers::{self, PinClick};
use crate::notifier::{Emission, RegionNotifier};
use crate::region::Region;
use crate::state::MapViewState;

/// Counters for a mounted view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStats {
    pub recomputes: u64,
    pub cache_hits: u64,
    pub regions_emitted: u64,
    pub regions_suppressed: u64,
    pub camera_updates: u64,
    pub camera_applied: u64,
    pub points_in_view: usize,
    pub total_points: usize,
}

/// One mounted map view: its state plus the collaborators the handlers need.
///
/// Created when the view mounts and dropped when it unmounts.
pub struct MapView {
    state: MapViewState,
    notifier: RegionNotifier,
    filter: ViewportFilter,
    camera: CameraFeed,
    store: Box<dyn BookmarkStore>,
    clock: Box<dyn Clock>,
    projection: Box<dyn Projection>,
    on_pin_click: Option<Box<dyn FnMut(&PinClick)>>,
    max_radius_km: Option<f64>,
    last_counts: (usize, usize),
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("state", &self.state)
            .field("notifier", &self.notifier)
            .field("filter", &self.filter)
            .field("has_pin_callback", &self.on_pin_click.is_some())
            .finish_non_exhaustive()
    }
}

impl MapView {
    /// View with in-memory bookmarks, the system clock and the linear projection.
    pub fn new(config: MapViewConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(InMemoryBookmarkStore::new()),
            Box::new(SystemClock),
        )
    }

    pub fn with_parts(
        config: MapViewConfig,
        store: Box<dyn BookmarkStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut state = MapViewState::new(config.center, config.zoom, config.radius_km);
        state.set_interactive(config.interactive);
        Self {
            state,
            notifier: RegionNotifier::new(config.dedup),
            filter: ViewportFilter::new(config.filter),
            camera: CameraFeed::new(config.camera_interval_ms),
            store,
            clock,
            projection: Box::new(LinearProjection::new(config.projection_zoom)),
            on_pin_click: None,
            max_radius_km: config.max_radius_km,
            last_counts: (0, 0),
        }
    }

    pub fn set_projection(&mut self, projection: Box<dyn Projection>) {
        self.projection = projection;
    }

    pub fn on_region_change(&mut self, listener: impl FnMut(&Region) + 'static) {
        self.notifier.set_listener(listener);
    }

    pub fn on_pin_click(&mut self, callback: impl FnMut(&PinClick) + 'static) {
        self.on_pin_click = Some(Box::new(callback));
    }

    pub fn state(&self) -> &MapViewState {
        &self.state
    }

    pub fn notifier(&self) -> &RegionNotifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut RegionNotifier {
        &mut self.notifier
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.state.set_interactive(interactive);
    }

    /// Points to render for the current center and zoom.
    pub fn visible_points<'a>(&mut self, set: &'a PoiSet) -> VisiblePoints<'a> {
        let out = self.filter.visible(set, self.state.center(), self.state.zoom());
        self.last_counts = (out.points_in_view, out.total_points);
        out
    }

    pub fn select_pin(&mut self, poi: &PointOfInterest) -> bool {
        let callback = self
            .on_pin_click
            .as_mut()
            .map(|cb| cb.as_mut() as &mut dyn FnMut(&PinClick));
        handlers::select_pin(&mut self.state, poi, callback)
    }

    /// Selects the point with `id` from `set`.
    pub fn select_pin_by_id(&mut self, set: &PoiSet, id: &str) -> Result<bool, MapViewError> {
        let poi = set
            .get(id)
            .ok_or_else(|| MapViewError::UnknownPoint(id.to_string()))?;
        Ok(self.select_pin(poi))
    }

    pub fn clear_selection(&mut self) {
        handlers::clear_selection(&mut self.state);
    }

    pub fn activate_cluster(&mut self, cluster: &Cluster) -> Emission {
        handlers::activate_cluster(&mut self.state, &mut self.notifier, cluster)
    }

    pub fn long_press(&mut self, point: ScreenPoint, rect: ScreenRect) -> LatLng {
        handlers::long_press(&mut self.state, self.projection.as_ref(), point, rect)
    }

    pub fn close_bookmark_form(&mut self) {
        handlers::close_bookmark_form(&mut self.state);
    }

    pub fn create_bookmark(&mut self, name: &str, position: LatLng) -> Result<Bookmark, MapViewError> {
        handlers::create_bookmark(
            &mut self.state,
            self.store.as_mut(),
            self.clock.as_ref(),
            name,
            position,
        )
    }

    pub fn submit_bookmark_form(&mut self, name: &str) -> Result<Option<Bookmark>, MapViewError> {
        handlers::submit_bookmark_form(
            &mut self.state,
            self.store.as_mut(),
            self.clock.as_ref(),
            name,
        )
    }

    pub fn bookmarks(&self) -> Result<Vec<Bookmark>, MapViewError> {
        Ok(self.store.list()?)
    }

    pub fn delete_bookmark(&mut self, id: &str) -> Result<bool, MapViewError> {
        Ok(self.store.delete(id)?)
    }

    pub fn jump_to_bookmark(&mut self, id: &str) -> Result<Emission, MapViewError> {
        handlers::jump_to_bookmark(&mut self.state, &mut self.notifier, self.store.as_ref(), id)
    }

    pub fn zoom_in(&mut self) -> Emission {
        handlers::zoom_in(&mut self.state, &mut self.notifier)
    }

    pub fn zoom_out(&mut self) -> Emission {
        handlers::zoom_out(&mut self.state, &mut self.notifier, self.max_radius_km)
    }

    pub fn pan_to(&mut self, center: LatLng) -> Emission {
        handlers::pan_to(&mut self.state, &mut self.notifier, center)
    }

    /// Feeds a widget camera update through the rate limit.
    ///
    /// Returns the emission when the update was applied and moved the center.
    pub fn camera_moved(&mut self, now: Timestamp, update: CameraUpdate) -> Option<Emission> {
        let released = self.camera.push(now, update)?;
        self.apply_camera(released)
    }

    /// Applies a held camera update once its slot has come.
    pub fn tick(&mut self, now: Timestamp) -> Option<Emission> {
        let released = self.camera.poll(now)?;
        self.apply_camera(released)
    }

    /// Applies any held camera update immediately (gesture end).
    pub fn settle(&mut self, now: Timestamp) -> Option<Emission> {
        let released = self.camera.flush(now)?;
        self.apply_camera(released)
    }

    pub fn stats(&self) -> ViewStats {
        ViewStats {
            recomputes: self.filter.recomputes(),
            cache_hits: self.filter.cache_hits(),
            regions_emitted: self.notifier.emitted(),
            regions_suppressed: self.notifier.suppressed(),
            camera_updates: self.camera.received(),
            camera_applied: self.camera.released(),
            points_in_view: self.last_counts.0,
            total_points: self.last_counts.1,
        }
    }

    fn apply_camera(&mut self, update: CameraUpdate) -> Option<Emission> {
        handlers::apply_camera(&mut self.state, &mut self.notifier, update.center, update.zoom)
    }
}
