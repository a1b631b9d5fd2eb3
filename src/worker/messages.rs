//! Worker message types for catalog queries.
//!
//! Requests carry a [`RequestId`] allocated by the store at dispatch time. The
//! worker echoes it in the response so the event handler can tell whether the
//! answer is still wanted.

use crate::catalog::{SearchQuery, SearchResultPage};
use crate::domain::error::QueryError;
use crate::domain::MovieDetail;
use std::fmt;

/// Monotonically increasing sequence number of a dispatched query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Messages sent from the session to the query worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Run a paged catalog search.
    Search {
        request_id: RequestId,
        query: SearchQuery,
    },

    /// Look up one movie's full detail.
    Detail {
        request_id: RequestId,
        id: String,
    },
}

impl WorkerMessage {
    pub const fn search(request_id: RequestId, query: SearchQuery) -> Self {
        Self::Search { request_id, query }
    }

    pub fn detail(request_id: RequestId, id: impl Into<String>) -> Self {
        Self::Detail {
            request_id,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::Search { request_id, .. } | Self::Detail { request_id, .. } => *request_id,
        }
    }
}

/// Responses sent from the query worker back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// A search finished, with a page or a [`QueryError`].
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchResultPage, QueryError>,
    },

    /// A detail lookup finished.
    DetailLoaded {
        request_id: RequestId,
        result: Result<MovieDetail, QueryError>,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::SearchCompleted { request_id, .. } | Self::DetailLoaded { request_id, .. } => *request_id,
        }
    }
}
