//! Structured logging to a rotating file in the data directory.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → <data_dir>/cinefile.log
//! ```
//!
//! # Features
//!
//! - **Plain-text lines**: one event per line, no ANSI colours, thread names included
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Span context**: events inside `debug_span!` scopes carry the span fields
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup and level resolution
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
