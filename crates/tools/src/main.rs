use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::geo::LatLng;
use foundation::time::SystemClock;
use tools::{BookmarkCommand, cmd_bookmarks, cmd_replay, cmd_visible, load_config};
use tracing_subscriber::EnvFilter;
use viewport::{DEFAULT_BUFFER, DEFAULT_MAX_POINTS, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM, FilterOptions};

#[derive(Parser, Debug)]
#[command(name = "tourmap", about = "Viewport filtering and region replay for tour maps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the points a renderer would draw for one viewport.
    Visible {
        /// Points file: an array of points, or `{tours, points}`.
        points: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long, default_value_t = DEFAULT_ZOOM)]
        zoom: f64,
        /// Cap on rendered points; 0 disables the cap.
        #[arg(long, env = "TOURMAP_MAX_POINTS", default_value_t = DEFAULT_MAX_POINTS)]
        max_points: usize,
        #[arg(long, env = "TOURMAP_BUFFER", default_value_t = DEFAULT_BUFFER)]
        buffer: f64,
        #[arg(long, env = "TOURMAP_MIN_ZOOM", default_value_t = DEFAULT_MIN_ZOOM)]
        min_zoom: f64,
        /// Fail on the first invalid point instead of skipping it.
        #[arg(long)]
        strict: bool,
    },
    /// Inspect or edit a bookmark store.
    Bookmarks {
        #[arg(long, env = "TOURMAP_BOOKMARKS", default_value = ".")]
        dir: PathBuf,
        #[arg(long, default_value = bookmarks::DEFAULT_STORAGE_KEY)]
        key: String,
        #[command(subcommand)]
        action: BookmarksAction,
    },
    /// Replay a scripted interaction against a map view.
    Replay {
        points: PathBuf,
        script: PathBuf,
        /// JSON map view config; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Persist bookmarks here instead of keeping them in memory.
        #[arg(long, env = "TOURMAP_BOOKMARKS")]
        bookmarks: Option<PathBuf>,
        #[arg(long, default_value = bookmarks::DEFAULT_STORAGE_KEY)]
        key: String,
        #[arg(long, env = "TOURMAP_DEBOUNCE_MS")]
        debounce_ms: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarksAction {
    List,
    Add {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    Remove {
        id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();

    let out = match cli.command {
        Command::Visible {
            points,
            lat,
            lng,
            zoom,
            max_points,
            buffer,
            min_zoom,
            strict,
        } => {
            let options = FilterOptions::default()
                .with_max_points((max_points > 0).then_some(max_points))
                .with_buffer(buffer)
                .with_min_zoom(min_zoom);
            cmd_visible(&points, strict, LatLng::new(lat, lng), zoom, &options)?
        }
        Command::Bookmarks { dir, key, action } => {
            let command = match action {
                BookmarksAction::List => BookmarkCommand::List,
                BookmarksAction::Add { name, lat, lng } => BookmarkCommand::Add {
                    name,
                    position: LatLng::new(lat, lng),
                },
                BookmarksAction::Remove { id } => BookmarkCommand::Remove { id },
            };
            cmd_bookmarks(&dir, &key, command, &SystemClock)?
        }
        Command::Replay {
            points,
            script,
            config,
            bookmarks,
            key,
            debounce_ms,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(ms) = debounce_ms {
                config.camera_interval_ms = ms;
            }
            let store = bookmarks.as_deref().map(|dir| (dir, key.as_str()));
            cmd_replay(&points, &script, config, store)?
        }
    };

    let text = serde_json::to_string_pretty(&out).map_err(|e| format!("json: {e}"))?;
    println!("{text}");
    Ok(())
}
