//! Side effects requested by the event handler.
//!
//! The handler mutates the store synchronously and returns the work it cannot
//! do itself as a `Vec<Action>`, which the session executes in order.
//!
//! # Example
//!
//! ```rust
//! use cinefile::app::Action;
//! use cinefile::catalog::SearchQuery;
//! use cinefile::worker::{RequestId, WorkerMessage};
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::search(
//!     RequestId::default().next(),
//!     SearchQuery::new("dark", "", 1),
//! ))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends a query to the background worker.
    PostToWorker(WorkerMessage),
}
