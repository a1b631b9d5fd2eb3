//! Background worker for catalog queries.
//!
//! Searches and detail lookups run off the caller's thread so a slow catalog
//! source never blocks state updates. Responses come back tagged with the
//! request id they answer.
//!
//! # Architecture
//!
//! - `messages`: Request/response types and the [`RequestId`] sequence number
//! - `handler`: Worker implementation, thread spawning, and the session-side handle

pub mod handler;
pub mod messages;

pub use handler::{CatalogWorker, WorkerHandle};
pub use messages::{RequestId, WorkerMessage, WorkerResponse};
