use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Pixel-space point, relative to the page (not the container).
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the map container in page pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.left + self.width * 0.5,
            self.top + self.height * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, ScreenPoint, ScreenRect};

    #[test]
    fn range_check_rejects_out_of_range_latitude() {
        assert!(LatLng::new(24.7136, 46.6753).is_in_range());
        assert!(!LatLng::new(91.0, 0.0).is_in_range());
        assert!(!LatLng::new(0.0, -180.5).is_in_range());
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!LatLng::new(f64::NAN, 0.0).is_finite());
        assert!(LatLng::new(0.0, 0.0).is_finite());
    }

    #[test]
    fn rect_center() {
        let r = ScreenRect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(r.center(), ScreenPoint::new(110.0, 70.0));
    }

    #[test]
    fn serializes_as_lat_lng_object() {
        let json = serde_json::to_string(&LatLng::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lng":-2.0}"#);
    }
}
