//! Commands behind the `tourmap` binary.
//!
//! Each command returns the JSON document the binary prints, so the same code
//! paths are exercised by tests without spawning a process.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use bookmarks::{Bookmark, BookmarkStore, JsonFileBookmarkStore};
use foundation::geo::LatLng;
use foundation::time::{Clock, SystemClock};
use mapview::{MapView, MapViewConfig, Region, parse_script};
use poi::{Ingested, PoiSet, RawPoi, Tour};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};
use viewport::{FilterOptions, filter_visible_points};

/// Accepted layouts of a points file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PointsFile {
    Points(Vec<RawPoi>),
    Catalog {
        #[serde(default)]
        tours: Vec<Tour>,
        #[serde(default)]
        points: Vec<RawPoi>,
    },
}

impl PointsFile {
    pub fn into_raw(self) -> Vec<RawPoi> {
        match self {
            PointsFile::Points(points) => points,
            PointsFile::Catalog { tours, points } => tours
                .iter()
                .flat_map(Tour::points)
                .map(RawPoi::from)
                .chain(points)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectedReport {
    index: usize,
    reason: String,
}

pub fn load_points(path: &Path, strict: bool) -> Result<Ingested, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let file: PointsFile =
        serde_json::from_str(&raw).map_err(|e| format!("parse {path:?}: {e}"))?;
    let raw = file.into_raw();

    if strict {
        let set = PoiSet::try_from_raw(raw).map_err(|e| format!("{path:?}: {e}"))?;
        return Ok(Ingested {
            set,
            rejected: Vec::new(),
        });
    }

    let ingested = PoiSet::from_raw(raw);
    if !ingested.rejected.is_empty() {
        warn!(
            count = ingested.rejected.len(),
            "some points were rejected at ingestion"
        );
    }
    Ok(ingested)
}

fn rejected_report(ingested: &Ingested) -> Vec<RejectedReport> {
    ingested
        .rejected
        .iter()
        .map(|r| RejectedReport {
            index: r.index,
            reason: r.error.to_string(),
        })
        .collect()
}

/// `tourmap visible`: runs the viewport filter once.
pub fn cmd_visible(
    points: &Path,
    strict: bool,
    center: LatLng,
    zoom: f64,
    options: &FilterOptions,
) -> Result<Value, String> {
    let ingested = load_points(points, strict)?;
    let set = &ingested.set;
    let out = filter_visible_points(set.points(), center, zoom, options);
    info!(
        total = out.total_points,
        in_view = out.points_in_view,
        rendered = out.len(),
        "viewport filtered"
    );

    Ok(json!({
        "fingerprint": set.fingerprint().to_hex(),
        "visible": out.visible,
        "pointsInView": out.points_in_view,
        "totalPoints": out.total_points,
        "bounds": out.bounds,
        "belowMinZoom": out.below_min_zoom,
        "rejected": rejected_report(&ingested),
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkCommand {
    List,
    Add { name: String, position: LatLng },
    Remove { id: String },
}

/// `tourmap bookmarks`: inspects or edits a JSON bookmark store.
pub fn cmd_bookmarks(
    dir: &Path,
    key: &str,
    command: BookmarkCommand,
    clock: &dyn Clock,
) -> Result<Value, String> {
    let mut store = JsonFileBookmarkStore::new(dir, key).map_err(|e| e.to_string())?;
    match command {
        BookmarkCommand::List => {
            let list = store.list().map_err(|e| e.to_string())?;
            serde_json::to_value(list).map_err(|e| format!("json: {e}"))
        }
        BookmarkCommand::Add { name, position } => {
            let existing = store.list().map_err(|e| e.to_string())?;
            let bookmark = Bookmark::new(
                name,
                position,
                clock.now(),
                existing.iter().map(|b| b.id.as_str()),
            );
            store.upsert(bookmark.clone()).map_err(|e| e.to_string())?;
            serde_json::to_value(bookmark).map_err(|e| format!("json: {e}"))
        }
        BookmarkCommand::Remove { id } => {
            let removed = store.delete(&id).map_err(|e| e.to_string())?;
            Ok(json!({ "id": id, "removed": removed }))
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<MapViewConfig, String> {
    let Some(path) = path else {
        return Ok(MapViewConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("parse {path:?}: {e}"))
}

/// `tourmap replay`: drives a map view through a scripted interaction.
///
/// Bookmarks go to `bookmark_dir` when given, otherwise they stay in memory.
pub fn cmd_replay(
    points: &Path,
    script: &Path,
    config: MapViewConfig,
    bookmark_dir: Option<(&Path, &str)>,
) -> Result<Value, String> {
    let ingested = load_points(points, false)?;
    let raw = fs::read_to_string(script).map_err(|e| format!("read {script:?}: {e}"))?;
    let actions = parse_script(&raw).map_err(|e| format!("parse {script:?}: {e}"))?;

    let mut view = match bookmark_dir {
        Some((dir, key)) => {
            let store = JsonFileBookmarkStore::new(dir, key).map_err(|e| e.to_string())?;
            MapView::with_parts(config, Box::new(store), Box::new(SystemClock))
        }
        None => MapView::new(config),
    };

    let regions = Rc::new(RefCell::new(Vec::<Region>::new()));
    let sink = Rc::clone(&regions);
    view.on_region_change(move |r| sink.borrow_mut().push(*r));

    let outcomes = view
        .replay(&ingested.set, &actions)
        .map_err(|e| e.to_string())?;
    info!(actions = actions.len(), regions = regions.borrow().len(), "replay finished");

    let regions = regions.borrow().clone();
    Ok(json!({
        "outcomes": outcomes,
        "regions": regions,
        "state": view.state(),
        "stats": view.stats(),
        "rejected": rejected_report(&ingested),
    }))
}
