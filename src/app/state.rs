//! Session state snapshot.
//!
//! [`AppState`] is the plain data behind a [`MovieStore`](super::MovieStore):
//! what the user searched for, what came back, which movie is open, and the
//! favorites list. Only the favorites outlive a session; every other field
//! starts at its default.
//!
//! # State Components
//!
//! - **Query**: search text, genre filter, one-based current page
//! - **Results**: current page of summaries, total match count, loading and error flags
//! - **Selection**: the open movie detail and its loading flag
//! - **Favorites**: summaries keyed by id, in insertion order

use crate::catalog::{SearchQuery, PAGE_SIZE};
use crate::domain::{MovieDetail, MovieSummary};

/// Maximum number of page links offered around the current page.
const PAGE_WINDOW: usize = 5;

/// All session state observed by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Text typed into the search box.
    pub search_text: String,

    /// Selected genre, empty for all genres.
    pub genre_filter: String,

    /// One-based page of results being shown.
    ///
    /// Reset to 1 whenever search text or genre filter is set.
    pub current_page: usize,

    /// Summaries on the current page.
    pub results: Vec<MovieSummary>,

    /// Count of every match for the current query.
    pub total_results: usize,

    /// A search is in flight.
    pub is_loading: bool,

    /// User-facing message for the last failed or empty search.
    pub last_error: Option<String>,

    /// The movie whose detail is open.
    pub selected_detail: Option<MovieDetail>,

    /// A detail lookup is in flight.
    pub is_loading_detail: bool,

    /// Favorite movies, unique by id, in insertion order.
    pub favorites: Vec<MovieSummary>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AppState {
    /// Creates default state around a restored favorites list.
    #[must_use]
    pub fn new(favorites: Vec<MovieSummary>) -> Self {
        Self {
            search_text: String::new(),
            genre_filter: String::new(),
            current_page: 1,
            results: Vec::new(),
            total_results: 0,
            is_loading: false,
            last_error: None,
            selected_detail: None,
            is_loading_detail: false,
            favorites,
        }
    }

    /// The catalog query described by the current search fields.
    #[must_use]
    pub fn current_query(&self) -> SearchQuery {
        SearchQuery::new(self.search_text.clone(), self.genre_filter.clone(), self.current_page)
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|movie| movie.id == id)
    }

    /// Number of result pages for the current total.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_results.div_ceil(PAGE_SIZE)
    }

    /// Page numbers to offer as direct links.
    ///
    /// Up to five pages, centred on the current page where possible and
    /// clamped to `1..=total_pages`. Empty when everything fits on one page.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinefile::app::AppState;
    ///
    /// let mut state = AppState::default();
    /// state.total_results = 95;
    /// state.current_page = 9;
    /// assert_eq!(state.page_window(), vec![6, 7, 8, 9, 10]);
    /// ```
    #[must_use]
    pub fn page_window(&self) -> Vec<usize> {
        let total_pages = self.total_pages();
        if total_pages <= 1 {
            return Vec::new();
        }

        let current = self.current_page.clamp(1, total_pages);
        let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(total_pages);
        if end - start + 1 < PAGE_WINDOW {
            start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        }

        (start..=end).collect()
    }
}
