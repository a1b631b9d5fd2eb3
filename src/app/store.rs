//! The application state store.
//!
//! [`MovieStore`] owns the session's [`AppState`] and the key-value backend that
//! favorites are persisted through. Every mutator is one synchronous state
//! transition. None of them triggers a catalog query; that is the event
//! handler's job (see [`handle_event`](super::handle_event)).
//!
//! # Example
//!
//! ```rust
//! use cinefile::app::MovieStore;
//! use cinefile::domain::MovieSummary;
//! use cinefile::storage::MemoryStore;
//!
//! let backend = MemoryStore::default();
//! let mut store = MovieStore::new(Box::new(backend.clone()));
//! store.add_favorite(MovieSummary::new("tt0816692", "Interstellar", "2014"));
//!
//! // A second store over the same backend sees the favorite.
//! let reopened = MovieStore::new(Box::new(backend));
//! assert!(reopened.is_favorite("tt0816692"));
//! ```

use super::state::AppState;
use crate::domain::{MovieDetail, MovieSummary};
use crate::storage::{load_favorites, save_favorites, KeyValueStore};
use crate::worker::RequestId;

/// Single authoritative state container for a session.
pub struct MovieStore {
    state: AppState,

    /// Backend the favorites snapshot is written through.
    storage: Box<dyn KeyValueStore>,

    /// Id of the most recently dispatched search.
    latest_search: RequestId,

    /// Id of the most recently dispatched detail lookup.
    latest_detail: RequestId,
}

impl std::fmt::Debug for MovieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieStore")
            .field("state", &self.state)
            .field("latest_search", &self.latest_search)
            .field("latest_detail", &self.latest_detail)
            .finish_non_exhaustive()
    }
}

impl MovieStore {
    /// Creates a store, restoring favorites from `storage`.
    ///
    /// Missing or malformed persisted data yields an empty favorites list.
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let favorites = load_favorites(storage.as_ref());
        tracing::debug!(favorites = favorites.len(), "store created");

        Self {
            state: AppState::new(favorites),
            storage,
            latest_search: RequestId::default(),
            latest_detail: RequestId::default(),
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn favorites(&self) -> &[MovieSummary] {
        &self.state.favorites
    }

    /// Sets the search text and returns to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.state.current_page = 1;
        tracing::trace!(query = %self.state.search_text, "search text updated");
    }

    /// Sets the genre filter and returns to page 1.
    pub fn set_genre_filter(&mut self, genre: impl Into<String>) {
        self.state.genre_filter = genre.into();
        self.state.current_page = 1;
        tracing::trace!(genre = %self.state.genre_filter, "genre filter updated");
    }

    /// Sets the current page. Not validated against the result total.
    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page;
    }

    /// Replaces the result page and total. Loading and error flags are untouched.
    pub fn set_results(&mut self, items: Vec<MovieSummary>, total: usize) {
        self.state.results = items;
        self.state.total_results = total;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
    }

    /// Sets or clears the error message. Independent of the loading flag.
    pub fn set_error(&mut self, error: Option<String>) {
        self.state.last_error = error;
    }

    /// Resets search text, page, results, total, and error.
    ///
    /// The genre filter and favorites are kept.
    pub fn clear_search(&mut self) {
        self.state.search_text.clear();
        self.state.current_page = 1;
        self.state.results.clear();
        self.state.total_results = 0;
        self.state.last_error = None;
        tracing::debug!(genre = %self.state.genre_filter, "search cleared");
    }

    /// Restores every field except favorites to its default.
    pub fn reset_state(&mut self) {
        let favorites = std::mem::take(&mut self.state.favorites);
        self.state = AppState::new(favorites);
        tracing::debug!("state reset");
    }

    /// Adds a favorite unless one with the same id exists.
    ///
    /// Returns whether the list changed. A change is persisted immediately.
    pub fn add_favorite(&mut self, movie: MovieSummary) -> bool {
        if self.state.is_favorite(&movie.id) {
            tracing::debug!(id = %movie.id, "already a favorite");
            return false;
        }

        tracing::debug!(id = %movie.id, title = %movie.title, "adding favorite");
        self.state.favorites.push(movie);
        self.persist_favorites();
        true
    }

    /// Removes the favorite with `id`, keeping the order of the rest.
    ///
    /// Returns whether the list changed. A change is persisted immediately.
    pub fn remove_favorite(&mut self, id: &str) -> bool {
        let before = self.state.favorites.len();
        self.state.favorites.retain(|movie| movie.id != id);

        if self.state.favorites.len() == before {
            tracing::debug!(id = %id, "not a favorite, nothing to remove");
            return false;
        }

        tracing::debug!(id = %id, "removed favorite");
        self.persist_favorites();
        true
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.is_favorite(id)
    }

    pub fn set_selected_detail(&mut self, detail: Option<MovieDetail>) {
        self.state.selected_detail = detail;
    }

    pub fn set_loading_detail(&mut self, loading: bool) {
        self.state.is_loading_detail = loading;
    }

    /// Allocates the id for a new search, making every earlier one stale.
    pub fn next_search_request(&mut self) -> RequestId {
        self.latest_search = self.latest_search.next();
        self.latest_search
    }

    /// Allocates the id for a new detail lookup, making every earlier one stale.
    pub fn next_detail_request(&mut self) -> RequestId {
        self.latest_detail = self.latest_detail.next();
        self.latest_detail
    }

    #[must_use]
    pub fn is_latest_search(&self, id: RequestId) -> bool {
        self.latest_search == id
    }

    #[must_use]
    pub fn is_latest_detail(&self, id: RequestId) -> bool {
        self.latest_detail == id
    }

    /// Writes the favorites snapshot. Failures are logged, never returned.
    fn persist_favorites(&mut self) {
        if let Err(e) = save_favorites(self.storage.as_mut(), &self.state.favorites) {
            tracing::error!(error = %e, "failed to persist favorites");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{CinefileError, Result};
    use crate::storage::{MemoryStore, FAVORITES_KEY};

    fn movie(id: &str) -> MovieSummary {
        MovieSummary::new(id, format!("Title {id}"), "2000")
    }

    fn ids(store: &MovieStore) -> Vec<&str> {
        store.favorites().iter().map(|m| m.id.as_str()).collect()
    }

    /// Backend whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(CinefileError::Storage("read-only".into()))
        }
    }

    #[test]
    fn add_favorite_is_idempotent() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        assert!(store.add_favorite(movie("a")));
        assert!(store.add_favorite(movie("b")));
        assert!(!store.add_favorite(movie("a")));
        assert_eq!(ids(&store), ["a", "b"]);
    }

    #[test]
    fn remove_keeps_order_and_ignores_unknown_ids() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        store.add_favorite(movie("a"));
        store.add_favorite(movie("b"));
        store.add_favorite(movie("c"));

        assert!(!store.remove_favorite("zzz"));
        assert_eq!(ids(&store), ["a", "b", "c"]);

        assert!(store.remove_favorite("a"));
        assert_eq!(ids(&store), ["b", "c"]);
    }

    #[test]
    fn favorites_survive_a_restart() {
        let backend = MemoryStore::default();
        {
            let mut store = MovieStore::new(Box::new(backend.clone()));
            store.add_favorite(movie("m"));
            store.set_search_text("not persisted");
        }

        let store = MovieStore::new(Box::new(backend.clone()));
        assert_eq!(ids(&store), ["m"]);
        assert_eq!(store.state().search_text, "");
        assert!(backend.read(FAVORITES_KEY).unwrap().is_some());
    }

    #[test]
    fn malformed_snapshot_starts_empty() {
        let store = MovieStore::new(Box::new(MemoryStore::with_value(FAVORITES_KEY, "[[[")));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn failed_persistence_is_not_observable() {
        let mut store = MovieStore::new(Box::new(ReadOnlyStore));
        assert!(store.add_favorite(movie("a")));
        assert!(store.is_favorite("a"));
        assert!(store.remove_favorite("a"));
    }

    #[test]
    fn query_setters_reset_page_even_with_same_value() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        store.set_search_text("dark");
        store.set_page(3);
        store.set_search_text("dark");
        assert_eq!(store.state().current_page, 1);

        store.set_genre_filter("Action");
        store.set_page(4);
        store.set_genre_filter("Action");
        assert_eq!(store.state().current_page, 1);
    }

    #[test]
    fn loading_does_not_clear_error() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        store.set_error(Some("Movie not found!".into()));
        store.set_loading(true);
        assert_eq!(store.state().last_error.as_deref(), Some("Movie not found!"));
        assert!(store.state().is_loading);
    }

    #[test]
    fn set_results_leaves_flags_alone() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        store.set_loading(true);
        store.set_error(Some("boom".into()));
        store.set_results(vec![movie("a")], 12);
        assert_eq!(store.state().total_results, 12);
        assert!(store.state().is_loading);
        assert_eq!(store.state().last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn clear_search_keeps_genre_and_favorites() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        store.add_favorite(movie("fav"));
        store.set_genre_filter("Drama");
        store.set_search_text("club");
        store.set_page(2);
        store.set_results(vec![movie("a")], 11);
        store.set_error(Some("x".into()));
        store.set_loading(true);

        store.clear_search();

        let state = store.state();
        assert_eq!(state.search_text, "");
        assert_eq!(state.current_page, 1);
        assert!(state.results.is_empty());
        assert_eq!(state.total_results, 0);
        assert_eq!(state.last_error, None);
        assert_eq!(state.genre_filter, "Drama");
        assert_eq!(ids(&store), ["fav"]);
        // clear_search does not touch the loading flag
        assert!(state.is_loading);
    }

    #[test]
    fn reset_state_keeps_only_favorites() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        store.add_favorite(movie("fav"));
        store.set_genre_filter("Drama");
        store.set_loading_detail(true);
        store.reset_state();
        assert_eq!(store.state(), &AppState::new(vec![movie("fav")]));
    }

    #[test]
    fn request_ids_supersede_each_other() {
        let mut store = MovieStore::new(Box::new(MemoryStore::default()));
        let first = store.next_search_request();
        let second = store.next_search_request();
        assert!(!store.is_latest_search(first));
        assert!(store.is_latest_search(second));

        let detail = store.next_detail_request();
        assert!(store.is_latest_detail(detail));
        assert!(store.is_latest_search(second));
    }
}
