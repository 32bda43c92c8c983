//! Query/cache orchestration.
//!
//! [`QueryCache`] is the unit of "fetch or serve from cache" between the
//! catalog client and consuming screens. Each [`QueryKey`] owns one
//! entry whose state machine (`Idle -> Loading -> Success | Error`) is
//! published through a watch channel; concurrent [`ensure`](QueryCache::ensure)
//! calls for a key that is already `Loading` subscribe to the in-flight
//! fetch instead of issuing another one.
//!
//! # Stale-result suppression
//!
//! Every started fetch carries the entry's generation at issue time.
//! [`invalidate`](QueryCache::invalidate) bumps the generation, so a
//! completion whose generation is no longer current is discarded rather
//! than applied; only the newest request's result ever reaches
//! subscribers. A suppressed fetch with no successor resets its entry to
//! `Idle` so waiters settle and the next `ensure` refetches.

mod key;
mod state;

pub use key::QueryKey;
pub use state::{QueryData, QueryHandle, QuerySnapshot, QueryStatus};

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::Result;
use crate::telemetry;

/// Default maximum number of cache entries before LRU eviction.
const DEFAULT_MAX_ENTRIES: u64 = 1_000;

/// Configuration for [`QueryCache`].
///
/// ```rust
/// # use cartelera::query::QueryCacheConfig;
/// # use std::time::Duration;
/// let config = QueryCacheConfig::new()
///     .max_entries(200)
///     .staleness(Duration::from_secs(300));
/// ```
#[derive(Debug, Clone)]
pub struct QueryCacheConfig {
    /// Maximum number of entries. Default: 1,000 (LRU eviction beyond).
    pub max_entries: u64,
    /// Age after which a successful entry is re-fetched by the next
    /// `ensure`. Default: `None`, meaning entries stay fresh for the
    /// process lifetime unless explicitly invalidated.
    pub staleness: Option<Duration>,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            staleness: None,
        }
    }
}

impl QueryCacheConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the staleness window.
    pub fn staleness(mut self, window: Duration) -> Self {
        self.staleness = Some(window);
        self
    }
}

/// Bookkeeping guarded by the slot mutex.
///
/// `generation` identifies the newest request for the key; `inflight`
/// holds the generation of the currently running fetch, if any. Both the
/// refetch decision and result application happen under this lock, so a
/// completion can never race a newer request's transition.
struct SlotState {
    generation: u64,
    inflight: Option<u64>,
}

/// One cache slot: published snapshot plus bookkeeping.
struct Slot {
    tx: watch::Sender<QuerySnapshot>,
    state: Mutex<SlotState>,
}

impl Slot {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(QuerySnapshot::idle());
        Self {
            tx,
            state: Mutex::new(SlotState {
                generation: 0,
                inflight: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SlotState> {
        self.state.lock().expect("slot state lock poisoned")
    }
}

/// Keyed cache of query entries with de-duplication and staleness.
///
/// Slots are held in a bounded moka LRU map; an evicted slot's watch
/// channel stays alive for existing subscribers, so a late completion
/// still reaches them even though new lookups start fresh.
pub struct QueryCache {
    slots: moka::sync::Cache<QueryKey, Arc<Slot>>,
    staleness: Option<Duration>,
}

impl QueryCache {
    /// Create a cache from the given configuration.
    pub fn new(config: &QueryCacheConfig) -> Self {
        Self {
            slots: moka::sync::Cache::new(config.max_entries),
            staleness: config.staleness,
        }
    }

    /// Snapshot of the entry for `key`; `Idle` if never requested.
    pub fn get(&self, key: &QueryKey) -> QuerySnapshot {
        match self.slots.get(key) {
            Some(slot) => slot.tx.borrow().clone(),
            None => QuerySnapshot::idle(),
        }
    }

    /// Ensure the entry for `key` is fresh, fetching if necessary, and
    /// return a live handle.
    ///
    /// A fetch starts iff the entry is `Idle`, `Error`, a stale
    /// `Success`, or its in-flight fetch has been superseded by
    /// [`invalidate`](Self::invalidate). While a current fetch is
    /// `Loading`, additional `ensure` calls subscribe to it; exactly one
    /// `fetch` future runs and every caller observes the same result.
    ///
    /// `fetch` is invoked at most once, on a spawned task; callers must
    /// be inside a tokio runtime.
    pub fn ensure<F, Fut>(&self, key: QueryKey, fetch: F) -> QueryHandle
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<QueryData>> + Send + 'static,
    {
        let slot = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Slot::new()))
            .into_value();
        let operation = key.operation();

        let started_generation = {
            let mut state = slot.lock();
            let snapshot = slot.tx.borrow().clone();
            let refetch = match state.inflight {
                // A current fetch is running: join it. A superseded one
                // is as good as absent.
                Some(inflight) => inflight != state.generation,
                None => match snapshot.status {
                    QueryStatus::Success => !self.is_fresh(&snapshot),
                    QueryStatus::Idle | QueryStatus::Error => true,
                    QueryStatus::Loading => false,
                },
            };
            if refetch {
                state.generation += 1;
                state.inflight = Some(state.generation);
                slot.tx.send_replace(QuerySnapshot::loading());
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation)
                    .increment(1);
                Some(state.generation)
            } else {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation)
                    .increment(1);
                None
            }
        };

        if let Some(generation) = started_generation {
            debug!(key = %key, generation, "starting fetch");
            let slot = Arc::clone(&slot);
            let task_key = key.clone();
            let future = fetch();
            tokio::spawn(async move {
                let started = Instant::now();
                let result = future.await;
                metrics::histogram!(telemetry::FETCH_DURATION_SECONDS, "operation" => operation)
                    .record(started.elapsed().as_secs_f64());
                apply(&slot, &task_key, generation, result);
            });
        }

        QueryHandle::new(key, slot.tx.subscribe())
    }

    /// Mark the entry for `key` stale and supersede any in-flight fetch.
    ///
    /// Cached data stays visible until the next `ensure` replaces it; a
    /// fetch that was running when the invalidation happened is
    /// discarded on completion.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(slot) = self.slots.get(key) {
            let mut state = slot.lock();
            state.generation += 1;
            slot.tx.send_modify(|snapshot| snapshot.fetched_at = None);
            debug!(key = %key, generation = state.generation, "invalidated entry");
        }
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.slots.invalidate_all();
    }

    fn is_fresh(&self, snapshot: &QuerySnapshot) -> bool {
        match (snapshot.fetched_at, self.staleness) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(window)) => at.elapsed() <= window,
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(&QueryCacheConfig::default())
    }
}

/// Apply a completed fetch to its slot, unless superseded.
fn apply(slot: &Slot, key: &QueryKey, generation: u64, result: Result<QueryData>) {
    let operation = key.operation();
    let mut state = slot.lock();
    if state.generation != generation {
        debug!(key = %key, generation, current = state.generation, "discarding superseded fetch result");
        metrics::counter!(telemetry::STALE_DISCARDED_TOTAL, "operation" => operation).increment(1);
        if state.inflight == Some(generation) {
            // Superseded with no successor fetch: settle waiters as Idle
            // so the next ensure refetches.
            state.inflight = None;
            slot.tx.send_modify(|snapshot| {
                if snapshot.status == QueryStatus::Loading {
                    *snapshot = QuerySnapshot::idle();
                }
            });
        }
        return;
    }

    state.inflight = None;
    match result {
        Ok(data) => {
            metrics::counter!(telemetry::FETCHES_TOTAL, "operation" => operation, "status" => "ok")
                .increment(1);
            slot.tx.send_replace(QuerySnapshot::success(data));
        }
        Err(error) => {
            warn!(key = %key, error = %error, "fetch failed");
            metrics::counter!(telemetry::FETCHES_TOTAL, "operation" => operation, "status" => "error")
                .increment(1);
            slot.tx.send_replace(QuerySnapshot::failure(error));
        }
    }
}
