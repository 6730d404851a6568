#[derive(Debug, Clone, PartialEq)]
pub enum PoiError {
    MissingCoordinate { id: String, field: &'static str },
    NonFiniteCoordinate { id: String },
    OutOfRange { id: String, lat: f64, lng: f64 },
    DuplicateId(String),
    Parse(String),
}

impl std::fmt::Display for PoiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoiError::MissingCoordinate { id, field } => {
                write!(f, "point {id:?} is missing its {field}")
            }
            PoiError::NonFiniteCoordinate { id } => {
                write!(f, "point {id:?} has a non-finite coordinate")
            }
            PoiError::OutOfRange { id, lat, lng } => {
                write!(f, "point {id:?} is out of range ({lat}, {lng})")
            }
            PoiError::DuplicateId(id) => write!(f, "duplicate point id {id:?}"),
            PoiError::Parse(msg) => write!(f, "invalid point data: {msg}"),
        }
    }
}

impl std::error::Error for PoiError {}
