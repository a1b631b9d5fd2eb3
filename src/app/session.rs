//! Runtime loop tying the store, the event handler, and the query worker.
//!
//! A [`Session`] is what a front end holds: it feeds [`Event`]s through
//! [`handle_event`], executes the returned [`Action`]s, and routes worker
//! responses back through the handler as [`Event::WorkerResponse`].

use crate::app::{handle_event, Action, Event, MovieStore};
use crate::catalog::Catalog;
use crate::domain::error::{QueryError, Result};
use crate::worker::{WorkerHandle, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Session {
    store: MovieStore,
    catalog: Arc<Catalog>,
    worker: WorkerHandle,
}

impl Session {
    /// Wraps a store and a spawned worker that reads from `catalog`.
    pub fn new(store: MovieStore, catalog: Arc<Catalog>, worker: WorkerHandle) -> Self {
        Self { store, catalog, worker }
    }

    #[must_use]
    pub const fn store(&self) -> &MovieStore {
        &self.store
    }

    /// The catalog the worker queries, for synchronous reads such as browse rows.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handles one event and executes the actions it produces.
    ///
    /// Returns whether observable state changed.
    ///
    /// # Errors
    ///
    /// Returns an error if a request cannot be posted to the worker.
    pub fn send(&mut self, event: Event) -> Result<bool> {
        let (changed, actions) = handle_event(&mut self.store, event);
        for action in actions {
            self.execute(action)?;
        }
        Ok(changed)
    }

    /// Runs one action. A request the worker cannot accept is answered locally
    /// with [`QueryError::QueryFailed`] so no loading flag is left set.
    fn execute(&mut self, action: Action) -> Result<()> {
        match action {
            Action::PostToWorker(message) => {
                let request_id = message.request_id();
                let is_search = matches!(message, WorkerMessage::Search { .. });
                tracing::debug!(request_id = %request_id, "posting to worker");

                if let Err(e) = self.worker.post(message) {
                    tracing::error!(request_id = %request_id, error = %e, "worker unavailable");
                    let failure = QueryError::QueryFailed(e.to_string());
                    let response = if is_search {
                        WorkerResponse::SearchCompleted { request_id, result: Err(failure) }
                    } else {
                        WorkerResponse::DetailLoaded { request_id, result: Err(failure) }
                    };
                    handle_event(&mut self.store, Event::WorkerResponse(response));
                    return Err(e);
                }
                Ok(())
            }
        }
    }

    /// Applies every worker response that is already available.
    ///
    /// Returns whether any of them changed state.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Some(response) = self.worker.try_recv() {
            changed |= handle_event(&mut self.store, Event::WorkerResponse(response)).0;
        }
        changed
    }

    /// Blocks until every posted request has been answered and applied.
    ///
    /// # Errors
    ///
    /// Returns [`CinefileError::Worker`](crate::domain::CinefileError::Worker)
    /// if the worker stops or does not finish within `timeout`.
    pub fn wait_idle(&mut self, timeout: Duration) -> Result<()> {
        let _span = tracing::debug_span!("wait_idle", in_flight = self.worker.in_flight()).entered();
        let deadline = Instant::now() + timeout;

        while self.worker.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let response = self.worker.recv_timeout(remaining)?;
            handle_event(&mut self.store, Event::WorkerResponse(response));
        }
        Ok(())
    }
}
