//! Event handling and state transition logic.
//!
//! Translates user input and worker responses into store mutations and worker
//! requests. This is where the "input changed, so query again" policy lives; the
//! store itself never triggers queries.
//!
//! # Event Types
//!
//! - **Query input**: `SearchTextChanged`, `GenreSelected`, `PageRequested`, `ClearSearch`, `Reset`
//! - **Selection**: `SelectMovie`, `CloseDetail`
//! - **Favorites**: `AddFavorite`, `RemoveFavorite`, `ToggleFavorite`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Stale Responses
//!
//! Each dispatched query gets a fresh [`RequestId`](crate::worker::RequestId)
//! from the store. A response whose id is no longer the latest one for its kind
//! is dropped, so a slow answer to an old query can never overwrite the answer
//! to a newer one.
//!
//! # Example
//!
//! ```rust
//! use cinefile::app::{handle_event, Event, MovieStore};
//! use cinefile::storage::MemoryStore;
//!
//! let mut store = MovieStore::new(Box::new(MemoryStore::default()));
//! let (changed, actions) = handle_event(&mut store, Event::SearchTextChanged("dark".into()));
//! assert!(changed);
//! assert_eq!(actions.len(), 1);
//! assert!(store.state().is_loading);
//! ```

use crate::app::{Action, MovieStore};
use crate::catalog::SearchQuery;
use crate::domain::error::QueryError;
use crate::domain::MovieSummary;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Input events and worker responses the handler understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search box content changed.
    SearchTextChanged(String),
    /// A genre was picked; empty means all genres.
    GenreSelected(String),
    /// The user asked for another result page.
    PageRequested(usize),
    /// Clears the search box and results, keeping the genre filter.
    ClearSearch,
    /// Restores every non-favorite field to its default.
    Reset,

    /// Opens the detail view for a movie id.
    SelectMovie(String),
    /// Closes the detail view.
    CloseDetail,

    AddFavorite(MovieSummary),
    RemoveFavorite(String),
    /// Adds the movie if it is not a favorite, removes it otherwise.
    ToggleFavorite(MovieSummary),

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates the store, and returns actions to execute.
///
/// The boolean is `true` when observable state changed.
pub fn handle_event(store: &mut MovieStore, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchTextChanged(text) => {
            store.set_search_text(text);
            (true, dispatch_search(store))
        }
        Event::GenreSelected(genre) => {
            store.set_genre_filter(genre);
            (true, dispatch_search(store))
        }
        Event::PageRequested(page) => {
            if entered_query(store).is_unfiltered() {
                tracing::debug!("no active search, ignoring page request");
                return (false, vec![]);
            }
            store.set_page(page.max(1));
            (true, dispatch_search(store))
        }
        Event::ClearSearch => {
            store.clear_search();
            (true, dispatch_search(store))
        }
        Event::Reset => {
            store.next_search_request();
            store.next_detail_request();
            store.reset_state();
            (true, vec![])
        }
        Event::SelectMovie(id) => {
            let request_id = store.next_detail_request();
            tracing::debug!(id = %id, request_id = %request_id, "loading movie detail");
            store.set_loading_detail(true);
            (true, vec![Action::PostToWorker(WorkerMessage::detail(request_id, id))])
        }
        Event::CloseDetail => {
            store.next_detail_request();
            store.set_selected_detail(None);
            store.set_loading_detail(false);
            (true, vec![])
        }
        Event::AddFavorite(movie) => (store.add_favorite(movie), vec![]),
        Event::RemoveFavorite(id) => (store.remove_favorite(&id), vec![]),
        Event::ToggleFavorite(movie) => {
            let changed = if store.is_favorite(&movie.id) {
                store.remove_favorite(&movie.id)
            } else {
                store.add_favorite(movie)
            };
            (changed, vec![])
        }
        Event::WorkerResponse(response) => (apply_response(store, response), vec![]),
    }
}

/// The query for the current search fields with surrounding whitespace dropped.
///
/// The store keeps the text as typed; the catalog matches needles verbatim.
fn entered_query(store: &MovieStore) -> SearchQuery {
    let state = store.state();
    SearchQuery::new(state.search_text.trim(), state.genre_filter.trim(), state.current_page)
}

/// Starts a search for the current query fields, or clears results if there is
/// nothing to search for.
fn dispatch_search(store: &mut MovieStore) -> Vec<Action> {
    let query = entered_query(store);

    if query.is_unfiltered() {
        // Also invalidates any search still in flight.
        store.next_search_request();
        store.set_results(Vec::new(), 0);
        store.set_error(None);
        store.set_loading(false);
        tracing::debug!("query empty, showing browse rows instead of results");
        return vec![];
    }

    let request_id = store.next_search_request();
    tracing::debug!(
        request_id = %request_id,
        query = %query.text,
        genre = %query.genre,
        page = query.page,
        "dispatching search"
    );

    store.set_error(None);
    store.set_loading(true);
    vec![Action::PostToWorker(WorkerMessage::search(request_id, query))]
}

/// Applies a worker response if it answers the latest request of its kind.
fn apply_response(store: &mut MovieStore, response: WorkerResponse) -> bool {
    match response {
        WorkerResponse::SearchCompleted { request_id, result } => {
            if !store.is_latest_search(request_id) {
                tracing::debug!(request_id = %request_id, "discarding stale search response");
                return false;
            }

            match result {
                Ok(page) => {
                    tracing::debug!(total = page.total_matches, items = page.items.len(), "search results applied");
                    store.set_results(page.items, page.total_matches);
                    store.set_error(None);
                }
                Err(e) => {
                    if let QueryError::QueryFailed(reason) = &e {
                        tracing::error!(reason = %reason, "search failed");
                    }
                    store.set_results(Vec::new(), 0);
                    store.set_error(Some(e.to_string()));
                }
            }
            store.set_loading(false);
            true
        }
        WorkerResponse::DetailLoaded { request_id, result } => {
            if !store.is_latest_detail(request_id) {
                tracing::debug!(request_id = %request_id, "discarding stale detail response");
                return false;
            }

            match result {
                Ok(detail) => store.set_selected_detail(Some(detail)),
                Err(e) => {
                    tracing::debug!(outcome = %e, "detail unavailable");
                    store.set_selected_detail(None);
                }
            }
            store.set_loading_detail(false);
            true
        }
    }
}
