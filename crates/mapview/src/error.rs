use bookmarks::BookmarkError;

#[derive(Debug, Clone, PartialEq)]
pub enum MapViewError {
    Bookmark(BookmarkError),
    UnknownPoint(String),
}

impl std::fmt::Display for MapViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapViewError::Bookmark(e) => write!(f, "{e}"),
            MapViewError::UnknownPoint(id) => write!(f, "no point with id {id:?}"),
        }
    }
}

impl std::error::Error for MapViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapViewError::Bookmark(e) => Some(e),
            MapViewError::UnknownPoint(_) => None,
        }
    }
}

impl From<BookmarkError> for MapViewError {
    fn from(e: BookmarkError) -> Self {
        MapViewError::Bookmark(e)
    }
}
