//! Interaction handlers.
//!
//! Each handler takes the view state explicitly, changes it, and announces the
//! new region through the notifier when center or radius changed. Handlers
//! never block and perform no I/O beyond the bookmark store they are given.

use bookmarks::{Bookmark, BookmarkStore};
use foundation::geo::{LatLng, ScreenPoint, ScreenRect};
use foundation::math::Projection;
use foundation::time::Clock;
use poi::PointOfInterest;
use tracing::debug;

use crate::cluster::Cluster;
use crate::error::MapViewError;
use crate::notifier::{Emission, RegionNotifier};
use crate::state::{
    BookmarkForm, CLUSTER_ZOOM_FACTOR, MIN_RADIUS_KM, MapViewState, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};

/// Payload handed to the pin-click callback.
#[derive(Debug, Clone, PartialEq)]
pub struct PinClick {
    pub poi_id: String,
    pub position: LatLng,
}

/// Activates a pin. Returns `false` (and does nothing) when the view is not
/// interactive.
///
/// A pin that belongs to a tour makes that tour the active one; other pins
/// leave the active tour untouched.
pub fn select_pin(
    state: &mut MapViewState,
    poi: &PointOfInterest,
    on_pin_click: Option<&mut dyn FnMut(&PinClick)>,
) -> bool {
    if !state.interactive {
        return false;
    }

    if let Some(callback) = on_pin_click {
        callback(&PinClick {
            poi_id: poi.id.clone(),
            position: poi.position,
        });
    }

    state.selected_poi = Some(poi.id.clone());
    if let Some(tour) = &poi.tour {
        debug!(%tour, "active tour changed");
        state.active_tour = Some(tour.clone());
    }
    true
}

pub fn clear_selection(state: &mut MapViewState) {
    state.selected_poi = None;
    state.active_tour = None;
}

/// Zoom-in shortcut on a cluster marker: recenter on it and shrink the radius.
pub fn activate_cluster(
    state: &mut MapViewState,
    notifier: &mut RegionNotifier,
    cluster: &Cluster,
) -> Emission {
    state.center = cluster.centroid;
    state.radius_km *= CLUSTER_ZOOM_FACTOR;
    notifier.notify(state)
}

/// Opens the bookmark form at the geo position under a long press.
///
/// The position comes from `projection`; with the default linear projection it
/// is only a coarse placement.
pub fn long_press(
    state: &mut MapViewState,
    projection: &dyn Projection,
    point: ScreenPoint,
    rect: ScreenRect,
) -> LatLng {
    let position = projection.screen_to_geo(point, rect, state.center);
    state.bookmark_form = Some(BookmarkForm { position });
    position
}

pub fn close_bookmark_form(state: &mut MapViewState) {
    state.bookmark_form = None;
}

/// Appends a bookmark (id and creation time from `clock`) and closes the form.
///
/// The form is closed even if the store fails.
pub fn create_bookmark(
    state: &mut MapViewState,
    store: &mut dyn BookmarkStore,
    clock: &dyn Clock,
    name: &str,
    position: LatLng,
) -> Result<Bookmark, MapViewError> {
    state.bookmark_form = None;

    let existing = store.list()?;
    let bookmark = Bookmark::new(
        name,
        position,
        clock.now(),
        existing.iter().map(|b| b.id.as_str()),
    );
    store.upsert(bookmark.clone())?;
    debug!(id = %bookmark.id, name, "bookmark created");
    Ok(bookmark)
}

/// Creates a bookmark at the open form's position. `Ok(None)` when no form is open.
pub fn submit_bookmark_form(
    state: &mut MapViewState,
    store: &mut dyn BookmarkStore,
    clock: &dyn Clock,
    name: &str,
) -> Result<Option<Bookmark>, MapViewError> {
    let Some(form) = state.bookmark_form else {
        return Ok(None);
    };
    create_bookmark(state, store, clock, name, form.position).map(Some)
}

/// Recenters on a stored bookmark, keeping the radius.
pub fn jump_to_bookmark(
    state: &mut MapViewState,
    notifier: &mut RegionNotifier,
    store: &dyn BookmarkStore,
    id: &str,
) -> Result<Emission, MapViewError> {
    let bookmark = store
        .get(id)?
        .ok_or_else(|| bookmarks::BookmarkError::NotFound(id.to_string()))?;
    state.center = bookmark.position;
    Ok(notifier.notify(state))
}

/// Shrinks the radius by 0.7, never below 1 km.
pub fn zoom_in(state: &mut MapViewState, notifier: &mut RegionNotifier) -> Emission {
    state.radius_km = (state.radius_km * ZOOM_IN_FACTOR).max(MIN_RADIUS_KM);
    notifier.notify(state)
}

/// Grows the radius by 1.5, capped only when `max_radius_km` is set.
pub fn zoom_out(
    state: &mut MapViewState,
    notifier: &mut RegionNotifier,
    max_radius_km: Option<f64>,
) -> Emission {
    let grown = state.radius_km * ZOOM_OUT_FACTOR;
    state.radius_km = match max_radius_km {
        Some(max) => grown.min(max),
        None => grown,
    };
    notifier.notify(state)
}

/// Recenters without changing the radius.
pub fn pan_to(state: &mut MapViewState, notifier: &mut RegionNotifier, center: LatLng) -> Emission {
    state.center = center;
    notifier.notify(state)
}

/// Applies a camera update from the map widget.
///
/// The zoom always follows the widget. A moved center counts as a pan and is
/// announced; a pure zoom gesture only changes the filter input.
pub fn apply_camera(
    state: &mut MapViewState,
    notifier: &mut RegionNotifier,
    center: LatLng,
    zoom: f64,
) -> Option<Emission> {
    state.zoom = zoom;
    if center == state.center {
        return None;
    }
    Some(pan_to(state, notifier, center))
}
