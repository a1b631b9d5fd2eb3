//! Error types for cinefile.
//!
//! [`CinefileError`] covers infrastructure failures (storage, I/O, configuration,
//! catalog loading, worker communication) and is what fallible functions return
//! through the [`Result`] alias. [`QueryError`] is the smaller taxonomy of catalog
//! query outcomes that the event handler turns into store state rather than
//! propagating.

use thiserror::Error;

/// The main error type for cinefile operations.
///
/// Most variants carry a description string; I/O and JSON errors convert
/// automatically via `#[from]`.
///
/// # Examples
///
/// ```
/// use cinefile::domain::CinefileError;
///
/// fn validate_config() -> Result<(), CinefileError> {
///     Err(CinefileError::Config("query_delay_ms must be a number".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinefileError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to a key-value backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The catalog fixture could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Communication with the background query worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// Outcome of a catalog query that did not produce a usable result.
///
/// The `Display` text of each variant is the user-facing message the event
/// handler writes into [`AppState::last_error`](crate::app::AppState::last_error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The search or filter matched nothing. Not a failure.
    #[error("Movie not found!")]
    NoResults,

    /// The catalog source itself failed to answer.
    ///
    /// Cannot happen with the in-memory catalog but is handled for other
    /// [`CatalogSource`](crate::catalog::CatalogSource) implementations.
    #[error("Search failed. Please try again.")]
    QueryFailed(String),

    /// No catalog entry carries the requested id.
    #[error("No movie with id {0}")]
    DetailNotFound(String),
}

/// A specialized `Result` type for cinefile operations.
pub type Result<T> = std::result::Result<T, CinefileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_messages_are_user_facing() {
        assert_eq!(QueryError::NoResults.to_string(), "Movie not found!");
        assert_eq!(
            QueryError::QueryFailed("disk on fire".into()).to_string(),
            "Search failed. Please try again."
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: CinefileError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CinefileError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
