//! Domain layer for cinefile.
//!
//! Core types independent of storage, threading, or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie records (summary, detail, catalog entry) and curation metadata
//!
//! # Examples
//!
//! ```
//! use cinefile::domain::{MovieSummary, Result};
//!
//! fn pick() -> Result<MovieSummary> {
//!     Ok(MovieSummary::new("tt0816692", "Interstellar", "2014"))
//! }
//! assert_eq!(pick().unwrap().title, "Interstellar");
//! ```

pub mod error;
pub mod movie;

pub use error::{CinefileError, QueryError, Result};
pub use movie::{
    CatalogEntry, Category, Curation, MovieDetail, MovieKind, MovieSummary, Rating, WatchProgress,
    NO_POSTER,
};
