use foundation::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Category tag of a point of interest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    Historic,
    Cultural,
    Religious,
    Nature,
    Modern,
    User,
}

impl PoiKind {
    pub const ALL: [PoiKind; 6] = [
        PoiKind::Historic,
        PoiKind::Cultural,
        PoiKind::Religious,
        PoiKind::Nature,
        PoiKind::Modern,
        PoiKind::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PoiKind::Historic => "historic",
            PoiKind::Cultural => "cultural",
            PoiKind::Religious => "religious",
            PoiKind::Nature => "nature",
            PoiKind::Modern => "modern",
            PoiKind::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(pub String);

impl TourId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, renderable point.
///
/// Points are immutable snapshots for the duration of a rendering session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    #[serde(flatten)]
    pub position: LatLng,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PoiKind>,
    #[serde(rename = "isPremium", default)]
    pub is_premium: bool,
    #[serde(rename = "tourId", default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<TourId>,
}

impl PointOfInterest {
    pub fn new(id: impl Into<String>, position: LatLng) -> Self {
        Self {
            id: id.into(),
            position,
            kind: None,
            is_premium: false,
            tour: None,
        }
    }

    pub fn with_kind(mut self, kind: PoiKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    pub fn in_tour(mut self, tour: TourId) -> Self {
        self.tour = Some(tour);
        self
    }
}

/// Point as delivered by the content supplier, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoi {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<PoiKind>,
    #[serde(rename = "isPremium", default)]
    pub is_premium: Option<bool>,
    #[serde(rename = "tourId", default)]
    pub tour: Option<TourId>,
}

impl From<PointOfInterest> for RawPoi {
    fn from(p: PointOfInterest) -> Self {
        Self {
            id: Some(p.id),
            lat: Some(p.position.lat),
            lng: Some(p.position.lng),
            kind: p.kind,
            is_premium: Some(p.is_premium),
            tour: p.tour,
        }
    }
}
