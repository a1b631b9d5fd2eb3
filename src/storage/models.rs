//! Persisted favorites snapshot.
//!
//! The only durable state is the favorites list. It is stored as a single JSON
//! document under [`FAVORITES_KEY`]:
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-19T12:00:00Z",
//!   "favorites": [
//!     { "id": "tt0111161", "title": "The Shawshank Redemption", "year": "1994",
//!       "kind": "movie", "poster_url": "N/A" }
//!   ]
//! }
//! ```

use crate::domain::error::{CinefileError, Result};
use crate::domain::MovieSummary;
use crate::storage::backend::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Storage key holding the favorites snapshot.
pub const FAVORITES_KEY: &str = "movie-store";

/// Current snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of the persisted favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesSnapshot {
    /// Format version for future migrations.
    pub version: u32,

    /// When the snapshot was written. Informational only.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,

    /// Favorites in insertion order.
    pub favorites: Vec<MovieSummary>,
}

impl FavoritesSnapshot {
    /// Creates a snapshot of `favorites` stamped with the current time.
    #[must_use]
    pub fn new(favorites: Vec<MovieSummary>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Some(Utc::now()),
            favorites,
        }
    }

    /// Parses and validates a stored snapshot.
    ///
    /// Repeated ids are collapsed to their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unsupported version.
    pub fn parse(json: &str) -> Result<Self> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CinefileError::Storage(format!(
                "unsupported favorites snapshot version {}",
                snapshot.version
            )));
        }

        let mut seen = HashSet::new();
        snapshot.favorites.retain(|movie| seen.insert(movie.id.clone()));
        Ok(snapshot)
    }
}

/// Reads favorites back from storage.
///
/// Never fails: an absent key, an unreadable backend, or a malformed snapshot
/// all yield an empty list. Failures are logged at `warn`.
pub fn load_favorites(store: &dyn KeyValueStore) -> Vec<MovieSummary> {
    let _span = tracing::debug_span!("load_favorites", key = FAVORITES_KEY).entered();

    let raw = match store.read(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no persisted favorites");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted favorites, starting empty");
            return Vec::new();
        }
    };

    match FavoritesSnapshot::parse(&raw) {
        Ok(snapshot) => {
            tracing::debug!(count = snapshot.favorites.len(), "favorites restored");
            snapshot.favorites
        }
        Err(e) => {
            tracing::warn!(error = %e, "persisted favorites are malformed, starting empty");
            Vec::new()
        }
    }
}

/// Writes the full favorites list to storage.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn save_favorites(store: &mut dyn KeyValueStore, favorites: &[MovieSummary]) -> Result<()> {
    let _span = tracing::debug_span!("save_favorites", count = favorites.len()).entered();

    let snapshot = FavoritesSnapshot::new(favorites.to_vec());
    let json = serde_json::to_string_pretty(&snapshot)?;
    store.write(FAVORITES_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::default();
        let movies = vec![
            MovieSummary::new("tt1", "One", "2001"),
            MovieSummary::new("tt2", "Two", "2002"),
        ];
        save_favorites(&mut store, &movies).unwrap();
        assert_eq!(load_favorites(&store), movies);
    }

    #[test]
    fn absent_or_malformed_snapshot_is_empty() {
        assert!(load_favorites(&MemoryStore::default()).is_empty());
        assert!(load_favorites(&MemoryStore::with_value(FAVORITES_KEY, "not json")).is_empty());
        assert!(load_favorites(&MemoryStore::with_value(FAVORITES_KEY, r#"{"favorites": 3}"#)).is_empty());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let json = r#"{"version": 99, "favorites": []}"#;
        assert!(FavoritesSnapshot::parse(json).is_err());
        assert!(load_favorites(&MemoryStore::with_value(FAVORITES_KEY, json)).is_empty());
    }

    #[test]
    fn repeated_ids_collapse_on_load() {
        let json = r#"{"version": 1, "favorites": [
            {"id": "tt1", "title": "One", "year": "2001", "kind": "movie", "poster_url": "N/A"},
            {"id": "tt1", "title": "One again", "year": "2001", "kind": "movie", "poster_url": "N/A"},
            {"id": "tt2", "title": "Two", "year": "2002", "kind": "series", "poster_url": "N/A"}
        ]}"#;
        let snapshot = FavoritesSnapshot::parse(json).unwrap();
        let titles: Vec<_> = snapshot.favorites.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
        assert_eq!(snapshot.saved_at, None);
    }
}
