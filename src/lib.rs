//! Cinefile: a movie catalog with substring search and persistent favorites.
//!
//! Cinefile provides:
//! - Case-insensitive search over a fixed movie catalog, paged ten at a time
//! - Detail lookup, category rows, featured and continue-watching lists
//! - A single application state store with explicit, synchronous transitions
//! - Favorites persisted to a JSON snapshot and restored on the next start
//! - Background query execution that ignores answers to superseded queries

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command line driver (main.rs)                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State store
//! │  - Event handling                                   │  ← Query policy
//! │  - Action dispatching                               │
//! │  - Session runtime                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Storage Layer │   │ Worker Layer  │
//! │ (catalog/)    │   │ (storage/)    │   │ (worker/)     │
//! │ - Search      │   │ - JSON I/O    │   │ - Query thread│
//! │ - Rows        │   │ - Favorites   │   │ - Request ids │
//! │ - Detail      │   │ - Backend API │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Movie model (domain/movie)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing-subscriber fmt layer                     │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State store, event handler, and session runtime
//! - [`catalog`]: Catalog fixture loading and query operations
//! - [`domain`]: Core domain types (movies, categories, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Key-value persistence and the favorites snapshot
//! - [`worker`]: Background worker for catalog queries
//! - [`observability`]: Log file setup
//!
//! # Configuration
//!
//! Settings come from a TOML file or a string map:
//!
//! ```toml
//! # ~/.config/cinefile/config.toml
//! data_dir = "~/.local/share/cinefile"
//! catalog_file = "~/movies/catalog.json"
//! query_delay_ms = 0
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ## Basic Usage (Library)
//!
//! ```rust
//! use cinefile::app::Event;
//! use cinefile::{initialize, Config};
//! use std::time::Duration;
//!
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: Some(dir.path().to_path_buf()),
//!     ..Default::default()
//! };
//!
//! let mut session = initialize(&config)?;
//! session.send(Event::SearchTextChanged("nolan".to_string()))?;
//! session.wait_idle(Duration::from_secs(5))?;
//!
//! let titles: Vec<_> = session.store().state().results.iter().map(|m| m.title.as_str()).collect();
//! assert!(titles.contains(&"Interstellar"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, MovieStore, Session};
pub use domain::{CinefileError, MovieDetail, MovieSummary, QueryError, Result};

use catalog::Catalog;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::JsonFileStore;
use worker::CatalogWorker;

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// data_dir = "/var/lib/cinefile"
/// query_delay_ms = 250
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the favorites snapshot and log file live.
    ///
    /// Default: the platform data directory joined with `cinefile`.
    pub data_dir: Option<PathBuf>,

    /// JSON catalog fixture to load instead of the embedded one.
    pub catalog_file: Option<PathBuf>,

    /// Simulated latency the worker adds to every query. Default: 0
    pub query_delay_ms: u64,

    /// Tracing level for the log file.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`, `catalog_file`: leading `~` expanded, empty values ignored
    /// - `query_delay_ms`: String → `u64` (falls back to 0 on parse error)
    /// - `trace_level`: trimmed, empty values ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::path::PathBuf;
    /// use cinefile::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/tmp/cinefile".to_string());
    /// map.insert("query_delay_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/cinefile")));
    /// assert_eq!(config.query_delay_ms, 150);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let path = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(infrastructure::expand_tilde)
        };

        let query_delay_ms = config
            .get("query_delay_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Self {
            data_dir: path("data_dir"),
            catalog_file: path("catalog_file"),
            query_delay_ms,
            trace_level: config
                .get("trace_level")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from),
        }
    }

    /// Reads configuration from a TOML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| CinefileError::Config(format!("{}: {e}", path.display())))?;

        config.data_dir = config.data_dir.map(|p| expand_path(&p));
        config.catalog_file = config.catalog_file.map(|p| expand_path(&p));
        Ok(config)
    }

    /// The configured data directory, or the platform default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::get_data_dir)
    }

    #[must_use]
    pub const fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }

    /// Loads the configured catalog fixture, or the embedded one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file cannot be read or parsed.
    pub fn load_catalog(&self) -> Result<Catalog> {
        self.catalog_file
            .as_deref()
            .map_or_else(Catalog::embedded, Catalog::from_file)
    }
}

fn expand_path(path: &Path) -> PathBuf {
    path.to_str().map_or_else(|| path.to_path_buf(), infrastructure::expand_tilde)
}

/// Builds a ready-to-use [`Session`] from configuration.
///
/// Loads the catalog, opens the favorites store in the data directory, and
/// spawns the query worker.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the data directory cannot
/// be created, or the worker thread cannot be spawned.
pub fn initialize(config: &Config) -> Result<Session> {
    let _span = tracing::debug_span!("initialize").entered();

    let catalog = Arc::new(config.load_catalog()?);
    tracing::debug!(entries = catalog.len(), "catalog ready");

    let storage = JsonFileStore::new(config.data_dir())?;
    let store = MovieStore::new(Box::new(storage));

    let worker = CatalogWorker::new(catalog.clone())
        .with_delay(config.query_delay())
        .spawn()?;

    tracing::info!(
        favorites = store.favorites().len(),
        delay_ms = config.query_delay_ms,
        "session initialized"
    );
    Ok(Session::new(store, catalog, worker))
}
