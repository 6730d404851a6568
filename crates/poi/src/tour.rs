use foundation::geo::LatLng;
use serde::{Deserialize, Serialize};

use crate::error::PoiError;
use crate::model::{PoiKind, PointOfInterest, TourId};
use crate::set::PoiSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(flatten)]
    pub position: LatLng,
}

/// An audio-guided tour: a start location plus ordered waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    #[serde(flatten)]
    pub location: LatLng,
    #[serde(rename = "type", default)]
    pub kind: Option<PoiKind>,
    #[serde(rename = "isPremium", default)]
    pub is_premium: bool,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl Tour {
    /// Id of the point contributed by waypoint `index`.
    pub fn waypoint_point_id(&self, index: usize) -> String {
        format!("{}:wp{index}", self.id)
    }

    /// Points this tour contributes: its own location first, then one per waypoint.
    ///
    /// All of them back-reference the tour and inherit its kind and premium flag.
    pub fn points(&self) -> Vec<PointOfInterest> {
        let template = |id: String, position: LatLng| PointOfInterest {
            id,
            position,
            kind: self.kind,
            is_premium: self.is_premium,
            tour: Some(self.id.clone()),
        };

        let mut out = Vec::with_capacity(1 + self.waypoints.len());
        out.push(template(self.id.to_string(), self.location));
        for (i, wp) in self.waypoints.iter().enumerate() {
            out.push(template(self.waypoint_point_id(i), wp.position));
        }
        out
    }

    /// The path drawn for the active tour: location followed by waypoints.
    pub fn path(&self) -> Vec<LatLng> {
        std::iter::once(self.location)
            .chain(self.waypoints.iter().map(|w| w.position))
            .collect()
    }
}

impl PoiSet {
    /// Builds a snapshot from tours plus free-standing points.
    pub fn from_tours(tours: &[Tour], extra: Vec<PointOfInterest>) -> Result<Self, PoiError> {
        let mut points: Vec<PointOfInterest> = tours.iter().flat_map(Tour::points).collect();
        points.extend(extra);
        Self::new(points)
    }
}
