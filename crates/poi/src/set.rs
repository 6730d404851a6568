use std::collections::BTreeSet;

use foundation::geo::LatLng;
use tracing::warn;

use crate::error::PoiError;
use crate::model::{PointOfInterest, RawPoi};

/// Content hash of a point snapshot.
///
/// Two snapshots with the same points in the same order share a fingerprint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

/// A point rejected at ingestion, with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub index: usize,
    pub error: PoiError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub set: PoiSet,
    pub rejected: Vec<Rejected>,
}

/// Immutable, validated snapshot of points handed to the viewport filter.
///
/// Every point has finite, in-range coordinates and a unique id.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiSet {
    points: Vec<PointOfInterest>,
    fingerprint: Fingerprint,
}

impl Default for PoiSet {
    fn default() -> Self {
        Self::from_validated(Vec::new())
    }
}

impl PoiSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates already-typed points. Fails on the first invalid one.
    pub fn new(points: Vec<PointOfInterest>) -> Result<Self, PoiError> {
        let mut seen = BTreeSet::new();
        for p in &points {
            check_position(&p.id, p.position)?;
            if !seen.insert(p.id.as_str()) {
                return Err(PoiError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self::from_validated(points))
    }

    /// Lenient ingestion: invalid points are dropped, logged and reported.
    ///
    /// Points without an id get `poi-{index}`.
    pub fn from_raw(raw: Vec<RawPoi>) -> Ingested {
        let mut seen = BTreeSet::new();
        let mut points = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();

        for (index, r) in raw.into_iter().enumerate() {
            match validate_raw(index, r) {
                Ok(p) if !seen.insert(p.id.clone()) => {
                    warn!(index, id = %p.id, "dropping point with duplicate id");
                    rejected.push(Rejected {
                        index,
                        error: PoiError::DuplicateId(p.id),
                    });
                }
                Ok(p) => points.push(p),
                Err(error) => {
                    warn!(index, %error, "dropping invalid point");
                    rejected.push(Rejected { index, error });
                }
            }
        }

        Ingested {
            set: Self::from_validated(points),
            rejected,
        }
    }

    /// Strict ingestion: the first invalid point fails the whole snapshot.
    pub fn try_from_raw(raw: Vec<RawPoi>) -> Result<Self, PoiError> {
        let points = raw
            .into_iter()
            .enumerate()
            .map(|(index, r)| validate_raw(index, r))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    /// Parses a JSON array of raw points, leniently.
    pub fn from_json(json: &str) -> Result<Ingested, PoiError> {
        let raw: Vec<RawPoi> =
            serde_json::from_str(json).map_err(|e| PoiError::Parse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    fn from_validated(points: Vec<PointOfInterest>) -> Self {
        let fingerprint = fingerprint_points(&points);
        Self {
            points,
            fingerprint,
        }
    }
}

fn check_position(id: &str, position: LatLng) -> Result<(), PoiError> {
    if !position.is_finite() {
        return Err(PoiError::NonFiniteCoordinate { id: id.to_string() });
    }
    if !position.is_in_range() {
        return Err(PoiError::OutOfRange {
            id: id.to_string(),
            lat: position.lat,
            lng: position.lng,
        });
    }
    Ok(())
}

fn validate_raw(index: usize, raw: RawPoi) -> Result<PointOfInterest, PoiError> {
    let id = raw.id.unwrap_or_else(|| format!("poi-{index}"));
    let Some(lat) = raw.lat else {
        return Err(PoiError::MissingCoordinate { id, field: "lat" });
    };
    let Some(lng) = raw.lng else {
        return Err(PoiError::MissingCoordinate { id, field: "lng" });
    };
    let position = LatLng::new(lat, lng);
    check_position(&id, position)?;

    Ok(PointOfInterest {
        id,
        position,
        kind: raw.kind,
        is_premium: raw.is_premium.unwrap_or(false),
        tour: raw.tour,
    })
}

fn fingerprint_points(points: &[PointOfInterest]) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(points.len() as u64).to_le_bytes());
    for p in points {
        hasher.update(&(p.id.len() as u64).to_le_bytes());
        hasher.update(p.id.as_bytes());
        hasher.update(&p.position.lat.to_bits().to_le_bytes());
        hasher.update(&p.position.lng.to_bits().to_le_bytes());
        hasher.update(p.kind.map(|k| k.as_str()).unwrap_or("").as_bytes());
        hasher.update(&[p.is_premium as u8, 0xff]);
        if let Some(tour) = &p.tour {
            hasher.update(tour.as_str().as_bytes());
        }
        hasher.update(&[0]);
    }
    Fingerprint(*hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::PoiSet;
    use crate::error::PoiError;
    use crate::model::{PointOfInterest, RawPoi};
    use foundation::geo::LatLng;
    use pretty_assertions::assert_eq;

    fn raw(id: &str, lat: Option<f64>, lng: Option<f64>) -> RawPoi {
        RawPoi {
            id: Some(id.to_string()),
            lat,
            lng,
            ..Default::default()
        }
    }

    #[test]
    fn lenient_ingestion_drops_and_reports_invalid_points() {
        let ingested = PoiSet::from_raw(vec![
            raw("a", Some(24.0), Some(46.0)),
            raw("b", None, Some(46.0)),
            raw("c", Some(f64::NAN), Some(46.0)),
            raw("d", Some(95.0), Some(46.0)),
            raw("a", Some(24.1), Some(46.1)),
        ]);

        let ids: Vec<_> = ingested.set.points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);

        let rejected: Vec<_> = ingested.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2, 3, 4]);
        assert_eq!(
            ingested.rejected[0].error,
            PoiError::MissingCoordinate {
                id: "b".to_string(),
                field: "lat"
            }
        );
        assert_eq!(ingested.rejected[3].error, PoiError::DuplicateId("a".to_string()));
    }

    #[test]
    fn strict_ingestion_fails_fast() {
        let err = PoiSet::try_from_raw(vec![
            raw("a", Some(24.0), Some(46.0)),
            raw("b", Some(24.0), None),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            PoiError::MissingCoordinate {
                id: "b".to_string(),
                field: "lng"
            }
        );
    }

    #[test]
    fn missing_ids_are_assigned_from_index() {
        let ingested = PoiSet::from_raw(vec![RawPoi {
            lat: Some(1.0),
            lng: Some(2.0),
            ..Default::default()
        }]);
        assert_eq!(ingested.set.points()[0].id, "poi-0");
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = PoiSet::new(vec![
            PointOfInterest::new("x", LatLng::new(0.0, 0.0)),
            PointOfInterest::new("x", LatLng::new(1.0, 1.0)),
        ])
        .unwrap_err();
        assert_eq!(err, PoiError::DuplicateId("x".to_string()));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = PoiSet::new(vec![PointOfInterest::new("x", LatLng::new(0.0, 0.0))]).unwrap();
        let b = PoiSet::new(vec![PointOfInterest::new("x", LatLng::new(0.0, 0.0))]).unwrap();
        let c = PoiSet::new(vec![PointOfInterest::new("x", LatLng::new(0.0, 0.5))]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_ne!(a.fingerprint(), PoiSet::empty().fingerprint());
        assert_eq!(a.fingerprint().to_hex().len(), 64);
    }

    #[test]
    fn parses_json_array() {
        let ingested = PoiSet::from_json(
            r#"[{"id":"m","lat":24.63,"lng":46.71,"type":"historic","isPremium":true,"tourId":"t1"}]"#,
        )
        .unwrap();
        let p = &ingested.set.points()[0];
        assert!(p.is_premium);
        assert_eq!(p.tour.as_ref().map(|t| t.as_str()), Some("t1"));
        assert!(matches!(PoiSet::from_json("{"), Err(PoiError::Parse(_))));
    }
}
