//! JSON file-based key-value backend.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary file first and
//! are renamed into place, so a crash never leaves a half-written value behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: one file read per call, no caching
//! - **Write**: serializes the whole value each time
//! - **Best for**: small snapshots written on user actions

use crate::domain::error::{CinefileError, Result};
use crate::storage::backend::KeyValueStore;
use std::path::{Path, PathBuf};

/// Directory-backed key-value store.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; a store instance is owned by one
/// [`MovieStore`](crate::app::MovieStore).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cinefile::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/cinefile"))?;
    /// # Ok::<(), cinefile::CinefileError>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?dir, "initializing JSON file store");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Rejects keys that are empty or could escape the store directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CinefileError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("json_read", path = ?path).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "value loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("json_write", path = ?path, bytes = value.len()).entered();

        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.read("movie-store").unwrap(), None);
    }

    #[test]
    fn write_then_read_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested")).unwrap();

        store.write("movie-store", r#"{"a":1}"#).unwrap();
        store.write("movie-store", r#"{"a":2}"#).unwrap();

        assert_eq!(store.read("movie-store").unwrap().as_deref(), Some(r#"{"a":2}"#));
        assert!(store.dir().join("movie-store.json").exists());
        assert!(!store.dir().join("movie-store.tmp").exists());
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(store.write("../evil", "x"), Err(CinefileError::Storage(_))));
        assert!(store.read("").is_err());
    }
}
