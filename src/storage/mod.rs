//! Storage layer for persisted favorites.
//!
//! Favorites are the only state that outlives a session. They are serialized as
//! one JSON snapshot and written through a key-value backend.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction for backend implementations
//! - `json`: Directory-backed store with atomic file writes
//! - `memory`: In-process store for tests and ephemeral sessions
//! - `models`: The favorites snapshot format and its load/save helpers

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use models::{load_favorites, save_favorites, FavoritesSnapshot, FAVORITES_KEY};
