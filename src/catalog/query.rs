//! Read-only catalog queries.
//!
//! Every function here is a pure function of a [`Catalog`] and its arguments.
//! Results always keep catalog order; there is no relevance ranking.
//!
//! # Matching Rules
//!
//! An entry matches a [`SearchQuery`] when both hold:
//!
//! 1. the query text is empty, or it is a case-insensitive substring of the
//!    title, the genre line, the director, or the actor line
//! 2. the genre filter is empty, or it is a case-insensitive substring of the
//!    genre line
//!
//! Matches are then paged [`PAGE_SIZE`] at a time.

use super::Catalog;
use crate::domain::error::QueryError;
use crate::domain::{CatalogEntry, Category, MovieDetail, MovieSummary};

/// Number of results per search page.
pub const PAGE_SIZE: usize = 10;

/// Number of leading catalog entries reported as "popular".
const POPULAR_COUNT: usize = 6;

/// Parameters of a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub genre: String,
    /// One-based page number. Zero is read as page 1.
    pub page: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, genre: impl Into<String>, page: usize) -> Self {
        Self {
            text: text.into(),
            genre: genre.into(),
            page,
        }
    }

    /// True when neither text nor genre narrows the catalog.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty() && self.genre.is_empty()
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultPage {
    pub items: Vec<MovieSummary>,
    /// Count of every match, not just this page.
    pub total_matches: usize,
    pub page: usize,
    pub page_size: usize,
}

impl SearchResultPage {
    /// Number of pages needed to show every match.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_matches.div_ceil(self.page_size)
    }

    /// Converts an empty match set into [`QueryError::NoResults`].
    ///
    /// A page past the end of a non-empty match set is still `Ok` with no items.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoResults`] when `total_matches` is zero.
    pub fn into_result(self) -> Result<Self, QueryError> {
        if self.total_matches == 0 {
            Err(QueryError::NoResults)
        } else {
            Ok(self)
        }
    }
}

/// Lowercased search needles, computed once per query.
struct Matcher {
    text: String,
    genre: String,
}

impl Matcher {
    fn new(query: &SearchQuery) -> Self {
        Self {
            text: query.text.to_lowercase(),
            genre: query.genre.to_lowercase(),
        }
    }

    fn matches(&self, entry: &CatalogEntry) -> bool {
        let detail = &entry.detail;
        let genre_line = detail.genre_line().to_lowercase();

        let matches_text = self.text.is_empty()
            || detail.summary.title.to_lowercase().contains(&self.text)
            || genre_line.contains(&self.text)
            || detail.director.to_lowercase().contains(&self.text)
            || detail.actor_line().to_lowercase().contains(&self.text);

        let matches_genre = self.genre.is_empty() || genre_line.contains(&self.genre);

        matches_text && matches_genre
    }
}

/// Searches the catalog and returns the requested page of matches.
///
/// An out-of-range page yields an empty `items` list with the real
/// `total_matches`. Use [`SearchResultPage::into_result`] to get the
/// [`QueryError::NoResults`] signal for an empty match set.
///
/// # Examples
///
/// ```
/// use cinefile::catalog::{search, Catalog, SearchQuery};
///
/// let catalog = Catalog::embedded()?;
/// let page = search(&catalog, &SearchQuery::new("nolan", "", 1));
/// assert!(page.items.iter().any(|m| m.title == "Interstellar"));
/// # Ok::<(), cinefile::CinefileError>(())
/// ```
#[must_use]
pub fn search(catalog: &Catalog, query: &SearchQuery) -> SearchResultPage {
    let _span = tracing::debug_span!("catalog_search",
        query_len = query.text.len(),
        genre = %query.genre,
        page = query.page
    ).entered();

    let matcher = Matcher::new(query);
    let matches: Vec<&CatalogEntry> = catalog
        .entries()
        .iter()
        .filter(|entry| matcher.matches(entry))
        .collect();

    let page = query.page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    let items = matches
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|entry| entry.summary().clone())
        .collect::<Vec<_>>();

    tracing::debug!(total_matches = matches.len(), page_items = items.len(), "search complete");

    SearchResultPage {
        items,
        total_matches: matches.len(),
        page,
        page_size: PAGE_SIZE,
    }
}

/// Looks up a movie by exact id. `None` is a normal outcome.
#[must_use]
pub fn get_detail(catalog: &Catalog, id: &str) -> Option<MovieDetail> {
    let detail = catalog
        .entries()
        .iter()
        .find(|entry| entry.id() == id)
        .map(|entry| entry.detail.clone());

    tracing::debug!(id = %id, found = detail.is_some(), "detail lookup complete");
    detail
}

/// Returns every entry tagged with `category`, in catalog order.
#[must_use]
pub fn get_by_category(catalog: &Catalog, category: Category) -> Vec<CatalogEntry> {
    filter_entries(catalog, |entry| entry.curation.category == Some(category))
}

/// Returns entries flagged as featured, in catalog order.
#[must_use]
pub fn get_featured(catalog: &Catalog) -> Vec<CatalogEntry> {
    filter_entries(catalog, |entry| entry.curation.featured)
}

/// Returns entries with watch progress, in catalog order.
#[must_use]
pub fn get_continue_watching(catalog: &Catalog) -> Vec<CatalogEntry> {
    filter_entries(catalog, |entry| entry.curation.continue_watching.is_some())
}

/// Returns the first entries of the catalog as summaries.
#[must_use]
pub fn get_popular(catalog: &Catalog) -> Vec<MovieSummary> {
    catalog
        .entries()
        .iter()
        .take(POPULAR_COUNT)
        .map(|entry| entry.summary().clone())
        .collect()
}

fn filter_entries(catalog: &Catalog, predicate: impl Fn(&CatalogEntry) -> bool) -> Vec<CatalogEntry> {
    catalog.entries().iter().filter(|entry| predicate(entry)).cloned().collect()
}
