use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use foundation::geo::LatLng;
use foundation::time::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Storage key bookmarks live under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "map_bookmarks";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub position: LatLng,
    /// Milliseconds since the Unix epoch. Entries written without it load as 0.
    #[serde(rename = "createdAt", default)]
    pub created_at_ms: u64,
}

impl Bookmark {
    /// New bookmark whose id is the creation timestamp.
    ///
    /// When that id is already taken (two bookmarks within one millisecond),
    /// a `-N` suffix keeps it unique.
    pub fn new<'a>(
        name: impl Into<String>,
        position: LatLng,
        now: Timestamp,
        existing_ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let base = now.as_millis().to_string();
        let taken: Vec<&str> = existing_ids
            .into_iter()
            .filter(|id| id.starts_with(base.as_str()))
            .collect();

        let mut id = base.clone();
        let mut n = 1;
        while taken.contains(&id.as_str()) {
            id = format!("{base}-{n}");
            n += 1;
        }

        Self {
            id,
            name: name.into(),
            position,
            created_at_ms: now.as_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    NotFound(String),
    StorageUnavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "bookmark {id:?} not found"),
            BookmarkError::StorageUnavailable => write!(f, "bookmark storage unavailable"),
            BookmarkError::Corrupt(msg) => write!(f, "bookmark storage corrupt: {msg}"),
            BookmarkError::Io(msg) => write!(f, "bookmark storage error: {msg}"),
        }
    }
}

impl std::error::Error for BookmarkError {}

/// Durable, ordered bookmark collection.
///
/// `list` returns bookmarks in insertion order.
pub trait BookmarkStore {
    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    fn get(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError>;
    /// Replaces the bookmark with the same id in place, or appends it.
    fn upsert(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError>;
    fn delete(&mut self, id: &str) -> Result<bool, BookmarkError>;
}

/// Applies `upsert` semantics to a loaded list.
fn upsert_into(list: &mut Vec<Bookmark>, bookmark: Bookmark) {
    match list.iter_mut().find(|b| b.id == bookmark.id) {
        Some(slot) => *slot = bookmark,
        None => list.push(bookmark),
    }
}

fn decode_list(raw: &str) -> Result<Vec<Bookmark>, BookmarkError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<Bookmark>>(raw).map_err(|e| BookmarkError::Corrupt(e.to_string()))
}

fn encode_list(list: &[Bookmark]) -> Result<String, BookmarkError> {
    serde_json::to_string(list).map_err(|e| BookmarkError::Io(e.to_string()))
}

#[derive(Debug, Default)]
pub struct InMemoryBookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

impl BookmarkStore for InMemoryBookmarkStore {
    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        Ok(self.bookmarks.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        Ok(self.bookmarks.iter().find(|b| b.id == id).cloned())
    }

    fn upsert(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError> {
        upsert_into(&mut self.bookmarks, bookmark);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool, BookmarkError> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        Ok(self.bookmarks.len() != before)
    }
}

/// Bookmarks kept as a JSON list in `<dir>/<key>.json`.
///
/// Every mutation rewrites the file through a temporary sibling and a rename,
/// so a crash leaves either the old or the new list.
#[derive(Debug, Clone)]
pub struct JsonFileBookmarkStore {
    path: PathBuf,
}

impl JsonFileBookmarkStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self, BookmarkError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| BookmarkError::Io(format!("create {dir:?}: {e}")))?;
        Ok(Self {
            path: dir.join(format!("{key}.json")),
        })
    }

    /// Uses `path` as the backing file directly.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_list(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(BookmarkError::Io(format!("read {:?}: {e}", self.path))),
        }
    }

    fn save(&self, list: &[Bookmark]) -> Result<(), BookmarkError> {
        let raw = encode_list(list)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file =
            fs::File::create(&tmp).map_err(|e| BookmarkError::Io(format!("create {tmp:?}: {e}")))?;
        file.write_all(raw.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| BookmarkError::Io(format!("write {tmp:?}: {e}")))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| BookmarkError::Io(format!("rename {tmp:?}: {e}")))?;
        debug!(path = ?self.path, count = list.len(), "bookmarks saved");
        Ok(())
    }
}

impl BookmarkStore for JsonFileBookmarkStore {
    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        self.load()
    }

    fn get(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        Ok(self.load()?.into_iter().find(|b| b.id == id))
    }

    fn upsert(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError> {
        let mut list = self.load()?;
        upsert_into(&mut list, bookmark);
        self.save(&list)
    }

    fn delete(&mut self, id: &str) -> Result<bool, BookmarkError> {
        let mut list = self.load()?;
        let before = list.len();
        list.retain(|b| b.id != id);
        if list.len() == before {
            return Ok(false);
        }
        self.save(&list)?;
        Ok(true)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{Bookmark, BookmarkError, BookmarkStore, decode_list, encode_list, upsert_into};

    /// Bookmarks kept as one JSON list under a `localStorage` key.
    #[derive(Debug)]
    pub struct LocalStorageBookmarkStore {
        key: String,
    }

    impl LocalStorageBookmarkStore {
        pub fn new(key: impl Into<String>) -> Result<Self, BookmarkError> {
            let store = Self { key: key.into() };
            // Fail early when storage is disabled (private mode, sandboxed iframe).
            window_local_storage()?;
            Ok(store)
        }

        fn load(&self) -> Result<Vec<Bookmark>, BookmarkError> {
            let storage = window_local_storage()?;
            let raw = storage
                .get_item(&self.key)
                .map_err(|e| BookmarkError::Io(format!("get_item failed: {:?}", e)))?;
            match raw {
                Some(raw) => decode_list(&raw),
                None => Ok(Vec::new()),
            }
        }

        fn save(&self, list: &[Bookmark]) -> Result<(), BookmarkError> {
            let storage = window_local_storage()?;
            let raw = encode_list(list)?;
            storage
                .set_item(&self.key, &raw)
                .map_err(|e| BookmarkError::Io(format!("set_item failed: {:?}", e)))
        }
    }

    impl BookmarkStore for LocalStorageBookmarkStore {
        fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
            self.load()
        }

        fn get(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
            Ok(self.load()?.into_iter().find(|b| b.id == id))
        }

        fn upsert(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError> {
            let mut list = self.load()?;
            upsert_into(&mut list, bookmark);
            self.save(&list)
        }

        fn delete(&mut self, id: &str) -> Result<bool, BookmarkError> {
            let mut list = self.load()?;
            let before = list.len();
            list.retain(|b| b.id != id);
            if list.len() == before {
                return Ok(false);
            }
            self.save(&list)?;
            Ok(true)
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, BookmarkError> {
        let win = web_sys::window().ok_or(BookmarkError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| BookmarkError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(BookmarkError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageBookmarkStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageBookmarkStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageBookmarkStore {
    pub fn new(_key: impl Into<String>) -> Result<Self, BookmarkError> {
        Err(BookmarkError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BookmarkStore for LocalStorageBookmarkStore {
    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        Err(BookmarkError::StorageUnavailable)
    }

    fn get(&self, _id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        Err(BookmarkError::StorageUnavailable)
    }

    fn upsert(&mut self, _bookmark: Bookmark) -> Result<(), BookmarkError> {
        Err(BookmarkError::StorageUnavailable)
    }

    fn delete(&mut self, _id: &str) -> Result<bool, BookmarkError> {
        Err(BookmarkError::StorageUnavailable)
    }
}
