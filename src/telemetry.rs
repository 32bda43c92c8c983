//! Telemetry metric name constants.
//!
//! Centralised metric names for cartelera operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `cartelera_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — query operation: "list", "detail" or "images"
//! - `status` — fetch outcome: "ok" or "error"

/// Total query-cache hits (an `ensure` call served from a fresh entry).
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "cartelera_cache_hits_total";

/// Total query-cache misses (an `ensure` call that started a fetch).
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "cartelera_cache_misses_total";

/// Total fetches completed, by outcome.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const FETCHES_TOTAL: &str = "cartelera_fetches_total";

/// Fetch duration in seconds, measured around the client call.
///
/// Labels: `operation`.
pub const FETCH_DURATION_SECONDS: &str = "cartelera_fetch_duration_seconds";

/// Total fetch results discarded because a newer request for the same
/// key superseded them.
///
/// Labels: `operation`.
pub const STALE_DISCARDED_TOTAL: &str = "cartelera_stale_results_discarded_total";
