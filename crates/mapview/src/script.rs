//! Replayable interaction scripts.
//!
//! A script is a JSON array of actions; replaying it against a view yields
//! one outcome per action plus the regions that were announced.

use bookmarks::Bookmark;
use foundation::geo::{LatLng, ScreenPoint, ScreenRect};
use foundation::time::Timestamp;
use poi::PoiSet;
use serde::{Deserialize, Serialize};

use crate::camera::CameraUpdate;
use crate::cluster::Cluster;
use crate::error::MapViewError;
use crate::notifier::Emission;
use crate::view::MapView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    Pan { lat: f64, lng: f64 },
    Camera { at: u64, lat: f64, lng: f64, zoom: f64 },
    Tick { at: u64 },
    Settle { at: u64 },
    ZoomIn,
    ZoomOut,
    /// Activates a cluster made of the listed points.
    Cluster { ids: Vec<String> },
    LongPress { x: f64, y: f64, rect: ScreenRect },
    CreateBookmark { name: String, lat: f64, lng: f64 },
    SubmitBookmark { name: String },
    JumpToBookmark { id: String },
    SelectPin { id: String },
    Render,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    /// `seq` is `None` when the region was suppressed.
    Region { seq: Option<u64> },
    Unchanged,
    FormOpened { position: LatLng },
    Bookmark { bookmark: Option<Bookmark> },
    Selected { accepted: bool },
    #[serde(rename_all = "camelCase")]
    Rendered {
        visible: Vec<String>,
        points_in_view: usize,
        total_points: usize,
    },
}

impl From<Emission> for Outcome {
    fn from(e: Emission) -> Self {
        match e {
            Emission::Emitted(seq) => Outcome::Region { seq: Some(seq) },
            Emission::Suppressed => Outcome::Region { seq: None },
        }
    }
}

impl From<Option<Emission>> for Outcome {
    fn from(e: Option<Emission>) -> Self {
        e.map_or(Outcome::Unchanged, Outcome::from)
    }
}

pub fn parse_script(json: &str) -> Result<Vec<Action>, serde_json::Error> {
    serde_json::from_str(json)
}

impl MapView {
    pub fn apply(&mut self, set: &PoiSet, action: &Action) -> Result<Outcome, MapViewError> {
        let outcome = match action {
            Action::Pan { lat, lng } => self.pan_to(LatLng::new(*lat, *lng)).into(),
            Action::Camera { at, lat, lng, zoom } => self
                .camera_moved(
                    Timestamp(*at),
                    CameraUpdate {
                        center: LatLng::new(*lat, *lng),
                        zoom: *zoom,
                    },
                )
                .into(),
            Action::Tick { at } => self.tick(Timestamp(*at)).into(),
            Action::Settle { at } => self.settle(Timestamp(*at)).into(),
            Action::ZoomIn => self.zoom_in().into(),
            Action::ZoomOut => self.zoom_out().into(),
            Action::Cluster { ids } => {
                let members = ids
                    .iter()
                    .map(|id| {
                        set.get(id)
                            .ok_or_else(|| MapViewError::UnknownPoint(id.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                match Cluster::from_points(members) {
                    Some(cluster) => self.activate_cluster(&cluster).into(),
                    None => Outcome::Unchanged,
                }
            }
            Action::LongPress { x, y, rect } => Outcome::FormOpened {
                position: self.long_press(ScreenPoint::new(*x, *y), *rect),
            },
            Action::CreateBookmark { name, lat, lng } => Outcome::Bookmark {
                bookmark: Some(self.create_bookmark(name, LatLng::new(*lat, *lng))?),
            },
            Action::SubmitBookmark { name } => Outcome::Bookmark {
                bookmark: self.submit_bookmark_form(name)?,
            },
            Action::JumpToBookmark { id } => self.jump_to_bookmark(id)?.into(),
            Action::SelectPin { id } => Outcome::Selected {
                accepted: self.select_pin_by_id(set, id)?,
            },
            Action::Render => {
                let out = self.visible_points(set);
                Outcome::Rendered {
                    visible: out.ids().map(str::to_string).collect(),
                    points_in_view: out.points_in_view,
                    total_points: out.total_points,
                }
            }
        };
        Ok(outcome)
    }

    /// Applies every action in order, stopping at the first error.
    pub fn replay(&mut self, set: &PoiSet, actions: &[Action]) -> Result<Vec<Outcome>, MapViewError> {
        actions.iter().map(|a| self.apply(set, a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Outcome, parse_script};
    use crate::config::MapViewConfig;
    use crate::view::MapView;
    use foundation::geo::LatLng;
    use foundation::time::{ManualClock, Timestamp};
    use poi::{PoiSet, PointOfInterest};
    use pretty_assertions::assert_eq;

    fn view() -> MapView {
        MapView::with_parts(
            MapViewConfig::default(),
            Box::new(bookmarks::InMemoryBookmarkStore::new()),
            Box::new(ManualClock::new(Timestamp(5_000))),
        )
    }

    #[test]
    fn parses_tagged_actions() {
        let actions = parse_script(
            r#"[
                {"action": "zoomIn"},
                {"action": "pan", "lat": 1.0, "lng": 2.0},
                {"action": "longPress", "x": 10, "y": 20,
                 "rect": {"left": 0, "top": 0, "width": 100, "height": 100}},
                {"action": "submitBookmark", "name": "Here"}
            ]"#,
        )
        .unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], Action::ZoomIn);
        assert_eq!(actions[1], Action::Pan { lat: 1.0, lng: 2.0 });
    }

    #[test]
    fn replays_zoom_out_sequence() {
        let mut v = view();
        let outcomes = v
            .replay(&PoiSet::empty(), &[Action::ZoomOut, Action::ZoomOut, Action::ZoomOut])
            .unwrap();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Region { seq: Some(0) },
                Outcome::Region { seq: Some(1) },
                Outcome::Region { seq: Some(2) },
            ]
        );
        assert!((v.state().radius_km() - 16.875).abs() < 1e-9);
    }

    #[test]
    fn cluster_and_render() {
        let set = PoiSet::new(vec![
            PointOfInterest::new("a", LatLng::new(24.70, 46.60)),
            PointOfInterest::new("b", LatLng::new(24.72, 46.62)),
        ])
        .unwrap();
        let mut v = view();
        let out = v
            .replay(
                &set,
                &[
                    Action::Cluster {
                        ids: vec!["a".into(), "b".into()],
                    },
                    Action::Render,
                ],
            )
            .unwrap();
        assert_eq!(out[0], Outcome::Region { seq: Some(0) });
        let Outcome::Rendered { visible, .. } = &out[1] else {
            panic!("expected render outcome, got {:?}", out[1]);
        };
        assert_eq!(visible.len(), 2);

        let err = v.apply(&set, &Action::Cluster { ids: vec!["nope".into()] });
        assert!(err.is_err());
    }

    #[test]
    fn long_press_then_submit_creates_bookmark() {
        let mut v = view();
        let actions = parse_script(
            r#"[
                {"action": "longPress", "x": 50, "y": 50,
                 "rect": {"left": 0, "top": 0, "width": 100, "height": 100}},
                {"action": "submitBookmark", "name": "Here"},
                {"action": "submitBookmark", "name": "Again"}
            ]"#,
        )
        .unwrap();
        let out = v.replay(&PoiSet::empty(), &actions).unwrap();
        let Outcome::Bookmark { bookmark: Some(b) } = &out[1] else {
            panic!("expected a bookmark, got {:?}", out[1]);
        };
        assert_eq!(b.name, "Here");
        assert_eq!(b.id, "5000");
        assert_eq!(out[2], Outcome::Bookmark { bookmark: None });
        assert!(v.state().bookmark_form().is_none());
    }
}
