use foundation::geo::LatLng;
use foundation::math::haversine_km;
use serde::{Deserialize, Serialize};

/// Normalized viewport announcement sent to the data-refetch layer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(flatten)]
    pub center: LatLng,
    #[serde(rename = "radius")]
    pub radius_km: f64,
}

impl Region {
    pub fn new(center: LatLng, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}

/// Whether a region close to the last notified one is still announced.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DedupPolicy {
    /// Every viewport change is announced.
    #[default]
    Never,
    /// Skip a region whose center moved at most `min_center_shift_km` and whose
    /// radius changed at most `min_radius_delta_km` since the last announcement.
    #[serde(rename_all = "camelCase")]
    Threshold {
        min_center_shift_km: f64,
        min_radius_delta_km: f64,
    },
}

impl DedupPolicy {
    pub fn is_redundant(&self, last: Option<&Region>, next: &Region) -> bool {
        let DedupPolicy::Threshold {
            min_center_shift_km,
            min_radius_delta_km,
        } = *self
        else {
            return false;
        };
        let Some(last) = last else {
            return false;
        };
        haversine_km(last.center, next.center) <= min_center_shift_km
            && (last.radius_km - next.radius_km).abs() <= min_radius_delta_km
    }
}

#[cfg(test)]
mod tests {
    use super::{DedupPolicy, Region};
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    const C: LatLng = LatLng::new(24.7136, 46.6753);

    #[test]
    fn json_shape() {
        let v = serde_json::to_value(Region::new(C, 3.5)).unwrap();
        assert_eq!(v, serde_json::json!({"lat": 24.7136, "lng": 46.6753, "radius": 3.5}));
    }

    #[test]
    fn never_policy_keeps_duplicates() {
        let r = Region::new(C, 5.0);
        assert!(!DedupPolicy::Never.is_redundant(Some(&r), &r));
    }

    #[test]
    fn threshold_policy() {
        let p = DedupPolicy::Threshold {
            min_center_shift_km: 0.5,
            min_radius_delta_km: 0.1,
        };
        let last = Region::new(C, 5.0);
        assert!(!p.is_redundant(None, &last));
        assert!(p.is_redundant(Some(&last), &last));
        // ~1.1 km north.
        let moved = Region::new(LatLng::new(C.lat + 0.01, C.lng), 5.0);
        assert!(!p.is_redundant(Some(&last), &moved));
        let zoomed = Region::new(C, 3.5);
        assert!(!p.is_redundant(Some(&last), &zoomed));
    }

    #[test]
    fn policy_json() {
        let p: DedupPolicy = serde_json::from_str(
            r#"{"mode":"threshold","minCenterShiftKm":0.2,"minRadiusDeltaKm":0.0}"#,
        )
        .unwrap();
        assert_eq!(
            p,
            DedupPolicy::Threshold {
                min_center_shift_km: 0.2,
                min_radius_delta_km: 0.0
            }
        );
        let p: DedupPolicy = serde_json::from_str(r#"{"mode":"never"}"#).unwrap();
        assert_eq!(p, DedupPolicy::Never);
    }
}
