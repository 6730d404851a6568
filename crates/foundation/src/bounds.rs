use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Axis-aligned lat/lng box in degrees.
///
/// Containment is inclusive on every edge. Any comparison against a NaN
/// coordinate is false, so NaN positions are never contained.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        GeoBounds {
            north,
            south,
            east,
            west,
        }
    }

    /// Square box with half-width `range` degrees around `center`.
    ///
    /// Does not wrap at the antimeridian and does not clamp at the poles.
    pub fn around(center: LatLng, range: f64) -> Self {
        GeoBounds {
            north: center.lat + range,
            south: center.lat - range,
            east: center.lng + range,
            west: center.lng - range,
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.north + self.south) * 0.5,
            (self.east + self.west) * 0.5,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }
}
