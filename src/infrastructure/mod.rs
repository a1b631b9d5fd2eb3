//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where cinefile keeps its data (favorites snapshot, log files) and
//! expands user-supplied paths.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
