use foundation::geo::LatLng;
use poi::{Fingerprint, PoiSet};
use tracing::debug;

use crate::filter::{Selection, VisiblePoints, select};
use crate::options::FilterOptions;

#[derive(Debug, Clone, PartialEq)]
struct InputKey {
    fingerprint: Fingerprint,
    center: LatLng,
    zoom_bits: u64,
    options: FilterOptions,
}

/// Reactive wrapper around [`select`].
///
/// Recomputes only when the snapshot, center, zoom or options change; identical
/// inputs are answered from the previous selection.
#[derive(Debug, Default)]
pub struct ViewportFilter {
    options: FilterOptions,
    last: Option<(InputKey, Selection)>,
    recomputes: u64,
    cache_hits: u64,
}

impl ViewportFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        self.options = options;
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    pub fn visible<'a>(&mut self, set: &'a PoiSet, center: LatLng, zoom: f64) -> VisiblePoints<'a> {
        let key = InputKey {
            fingerprint: set.fingerprint(),
            center,
            zoom_bits: zoom.to_bits(),
            options: self.options.clone(),
        };

        if let Some((last_key, selection)) = &self.last
            && *last_key == key
        {
            self.cache_hits += 1;
            return selection.resolve(set.points());
        }

        let selection = select(set.points(), center, zoom, &self.options);
        self.recomputes += 1;
        debug!(
            total = selection.total_points,
            in_view = selection.points_in_view,
            rendered = selection.indices.len(),
            zoom,
            "viewport selection recomputed"
        );

        let out = selection.resolve(set.points());
        self.last = Some((key, selection));
        out
    }
}
