//! Home-screen browse rows.
//!
//! When the user is neither searching nor filtering, the home screen shows a
//! fixed sequence of rows: featured titles, titles in progress, then one row per
//! headline category. Empty rows are left out.

use super::query::{get_by_category, get_continue_watching, get_featured};
use super::Catalog;
use crate::domain::{CatalogEntry, Category};

/// Genres offered in the genre filter, in display order.
pub const GENRES: [&str; 13] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "Western",
];

/// Categories shown as rows after the featured and continue-watching rows.
const HOME_CATEGORIES: [Category; 5] = [
    Category::Trending,
    Category::Action,
    Category::Drama,
    Category::Comedy,
    Category::SciFi,
];

/// What a browse row is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Featured,
    ContinueWatching,
    Category(Category),
}

impl RowKind {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::ContinueWatching => "Continue Watching",
            Self::Category(category) => category.title(),
        }
    }
}

/// A titled, ordered row of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseRow {
    pub kind: RowKind,
    pub entries: Vec<CatalogEntry>,
}

impl BrowseRow {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Builds the home-screen rows for a catalog, skipping empty ones.
#[must_use]
pub fn home_rows(catalog: &Catalog) -> Vec<BrowseRow> {
    let _span = tracing::debug_span!("home_rows", entries = catalog.len()).entered();

    let mut rows = vec![
        BrowseRow {
            kind: RowKind::Featured,
            entries: get_featured(catalog),
        },
        BrowseRow {
            kind: RowKind::ContinueWatching,
            entries: get_continue_watching(catalog),
        },
    ];
    rows.extend(HOME_CATEGORIES.into_iter().map(|category| BrowseRow {
        kind: RowKind::Category(category),
        entries: get_by_category(catalog, category),
    }));
    rows.retain(|row| !row.entries.is_empty());

    tracing::debug!(row_count = rows.len(), "home rows built");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_rows() {
        let catalog = Catalog::embedded().unwrap();
        let rows = home_rows(&catalog);
        let kinds: Vec<RowKind> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            [
                RowKind::Featured,
                RowKind::ContinueWatching,
                RowKind::Category(Category::Trending),
                RowKind::Category(Category::Action),
                RowKind::Category(Category::Drama),
                RowKind::Category(Category::Comedy),
                RowKind::Category(Category::SciFi),
            ]
        );
        assert_eq!(rows[0].entries.len(), 4);
        assert_eq!(rows[1].title(), "Continue Watching");
        assert_eq!(rows[3].entries.len(), 3);
    }

    #[test]
    fn empty_catalog_has_no_rows() {
        assert!(home_rows(&Catalog::default()).is_empty());
    }
}
