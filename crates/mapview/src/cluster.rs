use foundation::geo::LatLng;
use foundation::math::centroid;
use poi::PointOfInterest;

/// A group of points drawn as one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: LatLng,
    pub point_ids: Vec<String>,
}

impl Cluster {
    pub fn new(centroid: LatLng, point_ids: Vec<String>) -> Self {
        Self {
            centroid,
            point_ids,
        }
    }

    /// Cluster at the mean position of `points`; `None` for an empty group.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a PointOfInterest>) -> Option<Self> {
        let points: Vec<&PointOfInterest> = points.into_iter().collect();
        let centroid = centroid(points.iter().map(|p| p.position))?;
        Some(Self {
            centroid,
            point_ids: points.iter().map(|p| p.id.clone()).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.point_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_ids.is_empty()
    }
}
