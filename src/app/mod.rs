//! Application layer coordinating state, events, and actions.
//!
//! Sits between a front end (the CLI in `main.rs`, or a caller embedding the
//! library) and the catalog/storage/worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → Store Mutations → Actions → Worker
//!                           ↑                                         ↓
//!                           └─────────── Worker Responses ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and stale-response filtering
//! - [`session`]: Runtime loop executing actions against a spawned worker
//! - [`state`]: Plain application state and pagination helpers
//! - [`store`]: The state container and its mutators, including favorites persistence
//!
//! # Example
//!
//! ```rust
//! use cinefile::app::{handle_event, Event, MovieStore};
//! use cinefile::domain::MovieSummary;
//! use cinefile::storage::MemoryStore;
//!
//! let mut store = MovieStore::new(Box::new(MemoryStore::default()));
//! let movie = MovieSummary::new("tt0137523", "Fight Club", "1999");
//! let (changed, actions) = handle_event(&mut store, Event::AddFavorite(movie));
//! assert!(changed && actions.is_empty());
//! ```

pub mod actions;
pub mod handler;
pub mod session;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use session::Session;
pub use state::AppState;
pub use store::MovieStore;
