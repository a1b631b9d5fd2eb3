//! The movie catalog and its read-only query service.
//!
//! A [`Catalog`] is an ordered, immutable list of [`CatalogEntry`] records loaded
//! once at startup from a JSON fixture. Queries never mutate it; catalog order is
//! the order every query result preserves.
//!
//! # Modules
//!
//! - [`query`]: Substring search with pagination, detail and category lookups
//! - [`rows`]: Home-screen browse rows and the genre list offered to users
//!
//! # Fixture Format
//!
//! A JSON array of flat objects; curation fields sit beside the detail fields:
//!
//! ```json
//! [
//!   {
//!     "id": "tt0111161",
//!     "title": "The Shawshank Redemption",
//!     "year": "1994",
//!     "kind": "movie",
//!     "poster_url": "N/A",
//!     "genres": ["Drama"],
//!     "category": "trending",
//!     "featured": true
//!   }
//! ]
//! ```

pub mod query;
pub mod rows;

pub use query::{
    get_by_category, get_continue_watching, get_detail, get_featured, get_popular, search,
    SearchQuery, SearchResultPage, PAGE_SIZE,
};
pub use rows::{home_rows, BrowseRow, RowKind, GENRES};

use crate::domain::error::{CinefileError, QueryError, Result};
use crate::domain::CatalogEntry;
use std::collections::HashSet;
use std::path::Path;

/// Fixture compiled into the binary, used when no catalog file is configured.
const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// An ordered, read-only collection of catalog entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wraps entries in a catalog, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CinefileError::Catalog`] if two entries share an id.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(CinefileError::Catalog(format!("duplicate movie id: {}", entry.id())));
            }
        }
        Ok(Self { entries })
    }

    /// Parses a catalog from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids are not unique.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)
            .map_err(|e| CinefileError::Catalog(format!("failed to parse catalog JSON: {e}")))?;
        Self::new(entries)
    }

    /// Loads a catalog fixture from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "loading catalog fixture");
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        tracing::debug!(entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Loads the fixture shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded fixture itself is broken.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Anything the query worker can read a catalog snapshot from.
///
/// The in-memory [`Catalog`] always succeeds. A source backed by something that
/// can fail reports [`QueryError::QueryFailed`], which the event handler turns
/// into an error message and cleared results.
pub trait CatalogSource: Send + Sync {
    /// Returns the current catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::QueryFailed`] if the snapshot is unavailable.
    fn snapshot(&self) -> std::result::Result<&Catalog, QueryError>;
}

impl CatalogSource for Catalog {
    fn snapshot(&self) -> std::result::Result<&Catalog, QueryError> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fixture_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.entries()[0].id(), "tt0111161");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "tt1", "title": "A", "year": "2000", "kind": "movie", "poster_url": "N/A"},
            {"id": "tt1", "title": "B", "year": "2001", "kind": "movie", "poster_url": "N/A"}
        ]"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CinefileError::Catalog(msg) if msg.contains("tt1")));
    }

    #[test]
    fn malformed_fixture_is_a_catalog_error() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CinefileError::Catalog(_)));
    }

    #[test]
    fn fixture_file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, EMBEDDED_CATALOG).unwrap();
        assert_eq!(Catalog::from_file(&path).unwrap().len(), 10);

        let missing = Catalog::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, CinefileError::Io(_)));
    }
}
