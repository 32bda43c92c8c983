//! Per-entry query state and the subscriber handle.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::error::CarteleraError;
use crate::types::{MovieDetail, MovieSummary};

use super::key::QueryKey;

/// Lifecycle phase of a cache entry.
///
/// `Idle -> Loading -> {Success, Error}`; a later `ensure` that passes
/// the staleness/invalidation policy moves a terminal entry back to
/// `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Projected result stored in a cache entry, one variant per operation.
#[derive(Debug, Clone)]
pub enum QueryData {
    List(Vec<MovieSummary>),
    Detail(MovieDetail),
    Gallery(Vec<String>),
}

impl QueryData {
    pub fn as_list(&self) -> Option<&[MovieSummary]> {
        match self {
            QueryData::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_detail(&self) -> Option<&MovieDetail> {
        match self {
            QueryData::Detail(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn as_gallery(&self) -> Option<&[String]> {
        match self {
            QueryData::Gallery(urls) => Some(urls),
            _ => None,
        }
    }
}

/// Point-in-time view of one cache entry.
///
/// `data` is present iff `status == Success`, `error` iff
/// `status == Error`. `fetched_at` drives the staleness policy and is
/// cleared by invalidation.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub status: QueryStatus,
    pub data: Option<QueryData>,
    pub error: Option<Arc<CarteleraError>>,
    pub fetched_at: Option<Instant>,
}

impl QuerySnapshot {
    pub(crate) fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
        }
    }

    pub(crate) fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
            fetched_at: None,
        }
    }

    pub(crate) fn success(data: QueryData) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
            fetched_at: Some(Instant::now()),
        }
    }

    pub(crate) fn failure(error: CarteleraError) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(Arc::new(error)),
            fetched_at: Some(Instant::now()),
        }
    }

    /// Successful list data, if this snapshot carries any.
    pub fn list(&self) -> Option<&[MovieSummary]> {
        self.data.as_ref().and_then(QueryData::as_list)
    }

    /// Successful detail data, if this snapshot carries any.
    pub fn detail(&self) -> Option<&MovieDetail> {
        self.data.as_ref().and_then(QueryData::as_detail)
    }

    /// Successful gallery data, if this snapshot carries any.
    pub fn gallery(&self) -> Option<&[String]> {
        self.data.as_ref().and_then(QueryData::as_gallery)
    }

    /// Display text of the recorded error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// Live, observable view of one cache entry.
///
/// Returned by [`QueryCache::ensure`](super::QueryCache::ensure); wraps
/// a watch subscription, so every handle for the same key observes the
/// same state transitions.
#[derive(Debug)]
pub struct QueryHandle {
    key: QueryKey,
    rx: watch::Receiver<QuerySnapshot>,
}

impl QueryHandle {
    pub(crate) fn new(key: QueryKey, rx: watch::Receiver<QuerySnapshot>) -> Self {
        Self { key, rx }
    }

    /// The key this handle observes.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Current state of the entry.
    pub fn snapshot(&self) -> QuerySnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next state change and return the new snapshot.
    ///
    /// Returns the current snapshot unchanged if the entry's slot was
    /// dropped (the sender side is gone).
    pub async fn changed(&mut self) -> QuerySnapshot {
        let _ = self.rx.changed().await;
        self.rx.borrow_and_update().clone()
    }

    /// Wait until the entry leaves `Loading` and return the snapshot.
    ///
    /// Resolves immediately when the entry is already settled. An
    /// invalidated in-flight fetch with no successor settles as `Idle`.
    pub async fn settled(&mut self) -> QuerySnapshot {
        loop {
            let snapshot = self.rx.borrow_and_update().clone();
            if snapshot.status != QueryStatus::Loading {
                return snapshot;
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}
