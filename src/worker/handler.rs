//! Background worker answering catalog queries.
//!
//! [`CatalogWorker::handle_message`] is a plain function of the message and the
//! catalog source, so it can be called inline. [`CatalogWorker::spawn`] moves the
//! worker onto its own thread and returns a [`WorkerHandle`] for posting
//! requests and collecting responses.
//!
//! An optional per-request delay simulates a slow backend so callers can observe
//! loading states and out-of-order completion.

use crate::catalog::{get_detail, search, CatalogSource};
use crate::domain::error::{CinefileError, QueryError, Result};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Answers [`WorkerMessage`]s against a catalog source.
#[derive(Clone)]
pub struct CatalogWorker {
    source: Arc<dyn CatalogSource>,

    /// Artificial latency applied before answering each request.
    delay: Duration,
}

impl std::fmt::Debug for CatalogWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWorker")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl CatalogWorker {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            delay: Duration::ZERO,
        }
    }

    /// Sets the simulated latency per request.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _span = tracing::debug_span!("worker_handle_message",
            request_id = %message.request_id()
        ).entered();

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match message {
            WorkerMessage::Search { request_id, query } => {
                let result = self
                    .source
                    .snapshot()
                    .and_then(|catalog| search(catalog, &query).into_result());
                Self::log_outcome("search", &result);
                WorkerResponse::SearchCompleted { request_id, result }
            }
            WorkerMessage::Detail { request_id, id } => {
                let result = self.source.snapshot().and_then(|catalog| {
                    get_detail(catalog, &id).ok_or_else(|| QueryError::DetailNotFound(id.clone()))
                });
                Self::log_outcome("detail", &result);
                WorkerResponse::DetailLoaded { request_id, result }
            }
        }
    }

    fn log_outcome<T>(operation: &str, result: &std::result::Result<T, QueryError>) {
        match result {
            Ok(_) => tracing::debug!(operation = operation, "query successful"),
            Err(QueryError::QueryFailed(reason)) => {
                tracing::warn!(operation = operation, reason = %reason, "query failed");
            }
            Err(e) => tracing::debug!(operation = operation, outcome = %e, "query returned nothing"),
        }
    }

    /// Moves the worker onto a background thread.
    ///
    /// The thread exits when the returned handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(self) -> Result<WorkerHandle> {
        let (request_tx, request_rx) = mpsc::channel::<WorkerMessage>();
        let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>();

        let thread = std::thread::Builder::new()
            .name("cinefile-worker".to_string())
            .spawn(move || {
                tracing::debug!("worker started");
                for message in request_rx {
                    let response = self.handle_message(message);
                    if response_tx.send(response).is_err() {
                        tracing::debug!("session gone, stopping worker");
                        break;
                    }
                }
                tracing::debug!("worker stopped");
            })?;

        Ok(WorkerHandle {
            requests: Some(request_tx),
            responses: response_rx,
            in_flight: 0,
            thread: Some(thread),
        })
    }
}

/// Session-side end of a spawned [`CatalogWorker`].
#[derive(Debug)]
pub struct WorkerHandle {
    requests: Option<Sender<WorkerMessage>>,
    responses: Receiver<WorkerResponse>,

    /// Requests posted but not yet answered.
    in_flight: usize,

    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`CinefileError::Worker`] if the worker thread has stopped.
    pub fn post(&mut self, message: WorkerMessage) -> Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| CinefileError::Worker("worker is shut down".to_string()))?;
        sender
            .send(message)
            .map_err(|_| CinefileError::Worker("worker thread has stopped".to_string()))?;
        self.in_flight += 1;
        Ok(())
    }

    /// Number of requests still awaiting a response.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns a response if one is ready, without blocking.
    pub fn try_recv(&mut self) -> Option<WorkerResponse> {
        let response = self.responses.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(response)
    }

    /// Waits up to `timeout` for the next response.
    ///
    /// # Errors
    ///
    /// Returns [`CinefileError::Worker`] on timeout or if the worker has stopped.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<WorkerResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Ok(response)
            }
            Err(RecvTimeoutError::Timeout) => Err(CinefileError::Worker(format!(
                "no response within {}ms",
                timeout.as_millis()
            ))),
            Err(RecvTimeoutError::Disconnected) => {
                Err(CinefileError::Worker("worker thread has stopped".to_string()))
            }
        }
    }

    /// Closes the request channel and waits for the worker thread to finish.
    ///
    /// Later calls to [`post`](Self::post) fail.
    pub fn shutdown(&mut self) {
        self.requests = None;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
