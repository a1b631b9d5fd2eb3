//! Key-value storage abstraction.
//!
//! The store persists one logical key holding a serialized favorites snapshot.
//! This trait keeps the application layer independent of where that value
//! lives (a file on disk, memory in tests).

use crate::domain::error::Result;

/// Durable string-valued key-value storage.
///
/// Values are opaque to the backend; serialization is the caller's job (see
/// [`FavoritesSnapshot`](crate::storage::FavoritesSnapshot)).
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON file per key, atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map, shareable between handles
///
/// # Examples
///
/// ```
/// use cinefile::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.write("movie-store", "{}")?;
/// assert_eq!(store.read("movie-store")?.as_deref(), Some("{}"));
/// # Ok::<(), cinefile::CinefileError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been written under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written durably.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}
