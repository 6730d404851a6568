use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use foundation::math::degree_distance_sq;
use poi::PointOfInterest;

use crate::options::FilterOptions;
use crate::range::{bounds_for, sanitize_zoom};

/// Result of a viewport selection.
///
/// Ordering contract:
/// - `visible` is sorted by ascending degree-space distance from the center;
///   equal distances keep input order.
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePoints<'a> {
    pub visible: Vec<&'a PointOfInterest>,
    /// Points inside the box, before the cap.
    pub points_in_view: usize,
    pub total_points: usize,
    /// Box used for this selection (empty input still reports it).
    pub bounds: GeoBounds,
    pub below_min_zoom: bool,
}

impl VisiblePoints<'_> {
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Whether the cap dropped any in-view points.
    pub fn is_truncated(&self) -> bool {
        self.visible.len() < self.points_in_view
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|p| p.id.as_str())
    }
}

/// Indices into the input slice, ranked and capped.
///
/// The borrow-free form used by `ViewportFilter` to cache results.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub points_in_view: usize,
    pub total_points: usize,
    pub bounds: GeoBounds,
    pub below_min_zoom: bool,
}

impl Selection {
    pub fn resolve<'a>(&self, points: &'a [PointOfInterest]) -> VisiblePoints<'a> {
        VisiblePoints {
            visible: self.indices.iter().filter_map(|&i| points.get(i)).collect(),
            points_in_view: self.points_in_view,
            total_points: self.total_points,
            bounds: self.bounds,
            below_min_zoom: self.below_min_zoom,
        }
    }
}

/// Selects the points to render for a viewport.
///
/// Pure: identical inputs give identical output, nothing is mutated and no
/// I/O happens. Points with NaN coordinates are never inside the box.
pub fn filter_visible_points<'a>(
    points: &'a [PointOfInterest],
    center: LatLng,
    zoom: f64,
    options: &FilterOptions,
) -> VisiblePoints<'a> {
    select(points, center, zoom, options).resolve(points)
}

pub fn select(
    points: &[PointOfInterest],
    center: LatLng,
    zoom: f64,
    options: &FilterOptions,
) -> Selection {
    let zoom = sanitize_zoom(zoom);
    let bounds = bounds_for(center, zoom, options.buffer);
    let below_min_zoom = zoom < options.min_zoom;

    if points.is_empty() {
        return Selection {
            indices: Vec::new(),
            points_in_view: 0,
            total_points: 0,
            bounds,
            below_min_zoom,
        };
    }

    let mut ranked: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| bounds.contains(p.position))
        .map(|(i, p)| (i, degree_distance_sq(p.position, center)))
        .collect();

    // Stable sort keeps input order for ties.
    ranked.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let points_in_view = ranked.len();
    if let Some(max) = options.max_points {
        ranked.truncate(max);
    }

    Selection {
        indices: ranked.into_iter().map(|(i, _)| i).collect(),
        points_in_view,
        total_points: points.len(),
        bounds,
        below_min_zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_visible_points, select};
    use crate::options::FilterOptions;
    use crate::range::{bounds_for, range_for_zoom};
    use foundation::geo::LatLng;
    use foundation::math::degree_distance_sq;
    use poi::{PointOfInterest, RawPoi};
    use pretty_assertions::assert_eq;

    const RIYADH: LatLng = LatLng::new(24.7136, 46.6753);

    fn p(id: &str, lat: f64, lng: f64) -> PointOfInterest {
        PointOfInterest::new(id, LatLng::new(lat, lng))
    }

    /// Deterministic spread of `n` points inside `half_width` degrees of `center`.
    fn grid(center: LatLng, n: usize, half_width: f64) -> Vec<PointOfInterest> {
        let side = (n as f64).sqrt().ceil() as usize;
        let step = 2.0 * half_width / side as f64;
        (0..n)
            .map(|i| {
                let (r, c) = (i / side, i % side);
                p(
                    &format!("p{i}"),
                    center.lat - half_width + (r as f64 + 0.5) * step,
                    center.lng - half_width + (c as f64 + 0.5) * step,
                )
            })
            .collect()
    }

    /// Deterministic pseudo-random points over a wide area.
    fn scatter(n: usize, seed: u64) -> Vec<PointOfInterest> {
        let mut s = seed;
        let mut next = || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((s >> 11) as f64) / ((1u64 << 53) as f64)
        };
        (0..n)
            .map(|i| p(&format!("s{i}"), 20.0 + next() * 10.0, 40.0 + next() * 12.0))
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let out = filter_visible_points(&[], RIYADH, 14.0, &FilterOptions::default());
        assert!(out.is_empty());
        assert_eq!(out.points_in_view, 0);
        assert_eq!(out.total_points, 0);
    }

    #[test]
    fn caps_at_max_points_in_distance_order() {
        let pts = grid(RIYADH, 150, 0.2);
        let out = filter_visible_points(&pts, RIYADH, 14.0, &FilterOptions::default());
        assert_eq!(out.len(), 100);
        assert_eq!(out.points_in_view, 150);
        assert_eq!(out.total_points, 150);
        assert!(out.is_truncated());

        let d: Vec<f64> = out
            .visible
            .iter()
            .map(|p| degree_distance_sq(p.position, RIYADH))
            .collect();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn uncapped_returns_everything_in_view() {
        let pts = grid(RIYADH, 150, 0.2);
        let opts = FilterOptions::default().with_max_points(None);
        let out = filter_visible_points(&pts, RIYADH, 14.0, &opts);
        assert_eq!(out.len(), 150);
        assert!(!out.is_truncated());
    }

    #[test]
    fn excludes_points_outside_the_box() {
        let range = range_for_zoom(14.0, 0.2);
        let pts = vec![
            p("inside", RIYADH.lat + range * 0.5, RIYADH.lng),
            p("edge", RIYADH.lat + range, RIYADH.lng - range),
            p("outside", RIYADH.lat + range * 1.01, RIYADH.lng),
        ];
        let out = filter_visible_points(&pts, RIYADH, 14.0, &FilterOptions::default());
        let ids: Vec<_> = out.ids().collect();
        assert_eq!(ids, vec!["inside", "edge"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let origin = LatLng::new(0.0, 0.0);
        let pts = vec![
            p("east", 0.0, 0.1),
            p("west", 0.0, -0.1),
            p("center", 0.0, 0.0),
        ];
        let out = filter_visible_points(&pts, origin, 14.0, &FilterOptions::default());
        let ids: Vec<_> = out.ids().collect();
        assert_eq!(ids, vec!["center", "east", "west"]);
    }

    #[test]
    fn nan_points_are_silently_excluded() {
        // Bypasses PoiSet validation on purpose.
        let pts = vec![p("bad", f64::NAN, RIYADH.lng), p("good", RIYADH.lat, RIYADH.lng)];
        let out = filter_visible_points(&pts, RIYADH, 14.0, &FilterOptions::default());
        let ids: Vec<_> = out.ids().collect();
        assert_eq!(ids, vec!["good"]);
        assert_eq!(out.total_points, 2);
    }

    #[test]
    fn properties_hold_over_varied_viewports() {
        let pts = scatter(400, 7);
        for (zoom, max) in [(8.0, Some(50)), (12.0, Some(100)), (14.0, None), (18.0, Some(3))] {
            for center in [RIYADH, LatLng::new(21.4858, 39.1925), LatLng::new(26.0, 50.0)] {
                let opts = FilterOptions::default().with_max_points(max);
                let out = filter_visible_points(&pts, center, zoom, &opts);
                let bounds = bounds_for(center, zoom, opts.buffer);

                // Subset, no fabrication.
                assert!(out.visible.iter().all(|v| pts.iter().any(|p| std::ptr::eq(p, *v))));
                // Cap.
                if let Some(max) = max {
                    assert!(out.len() <= max);
                }
                // In bounds.
                assert!(out.visible.iter().all(|v| bounds.contains(v.position)));
                // Ranked.
                let d: Vec<f64> = out
                    .visible
                    .iter()
                    .map(|v| degree_distance_sq(v.position, center))
                    .collect();
                assert!(d.windows(2).all(|w| w[0] <= w[1]));
                // Idempotent.
                assert_eq!(out, filter_visible_points(&pts, center, zoom, &opts));
            }
        }
    }

    #[test]
    fn below_min_zoom_is_flagged_not_enforced() {
        let pts = vec![p("a", RIYADH.lat, RIYADH.lng)];
        let out = filter_visible_points(&pts, RIYADH, 8.0, &FilterOptions::default());
        assert!(out.below_min_zoom);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn selection_resolves_against_the_same_slice() {
        let pts = grid(RIYADH, 9, 0.05);
        let sel = select(&pts, RIYADH, 14.0, &FilterOptions::default());
        let direct = filter_visible_points(&pts, RIYADH, 14.0, &FilterOptions::default());
        assert_eq!(sel.resolve(&pts), direct);
    }

    #[test]
    fn validated_snapshot_feeds_the_filter() {
        let ingested = poi::PoiSet::from_raw(vec![
            RawPoi {
                id: Some("ok".to_string()),
                lat: Some(RIYADH.lat),
                lng: Some(RIYADH.lng),
                ..Default::default()
            },
            RawPoi {
                id: Some("no-lng".to_string()),
                lat: Some(RIYADH.lat),
                ..Default::default()
            },
        ]);
        let out = filter_visible_points(
            ingested.set.points(),
            RIYADH,
            14.0,
            &FilterOptions::default(),
        );
        assert_eq!(out.total_points, 1);
        assert_eq!(out.ids().collect::<Vec<_>>(), vec!["ok"]);
    }
}
