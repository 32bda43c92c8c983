//! Integration tests for [`QueryCache`] — de-duplication, the entry
//! state machine, staleness, and stale-result suppression.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use cartelera::query::{QueryCache, QueryCacheConfig, QueryData, QueryKey, QueryStatus};
use cartelera::{CarteleraError, ListCategory};

fn gallery(urls: &[&str]) -> QueryData {
    QueryData::Gallery(urls.iter().map(|u| u.to_string()).collect())
}

/// Fetch that counts invocations, sleeps, then yields a fixed gallery.
fn counting_fetch(
    calls: &Arc<AtomicUsize>,
    delay: Duration,
    url: &str,
) -> impl Future<Output = cartelera::Result<QueryData>> + Send + 'static + use<> {
    let calls = Arc::clone(calls);
    let url = url.to_string();
    async move {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        Ok(QueryData::Gallery(vec![url]))
    }
}

// =============================================================================
// State machine
// =============================================================================

#[tokio::test]
async fn entry_moves_idle_loading_success() {
    let cache = QueryCache::default();
    let key = QueryKey::detail(603);

    assert_eq!(cache.get(&key).status, QueryStatus::Idle);

    let mut handle = cache.ensure(key.clone(), || async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(gallery(&["a"]))
    });
    assert_eq!(handle.snapshot().status, QueryStatus::Loading);
    assert!(handle.snapshot().data.is_none());

    let settled = handle.settled().await;
    assert_eq!(settled.status, QueryStatus::Success);
    assert_eq!(settled.gallery().unwrap(), ["a".to_string()]);
    assert!(settled.fetched_at.is_some());

    // The cache-level view agrees with the handle.
    assert_eq!(cache.get(&key).status, QueryStatus::Success);
}

#[tokio::test]
async fn failed_fetch_records_error_entry() {
    let cache = QueryCache::default();
    let key = QueryKey::images(1);

    let mut handle = cache.ensure(key.clone(), || async {
        Err(CarteleraError::Remote { status: 500 })
    });
    let settled = handle.settled().await;

    assert_eq!(settled.status, QueryStatus::Error);
    assert!(settled.data.is_none());
    assert!(settled.error_message().unwrap().contains("500"));
    assert_eq!(cache.get(&key).status, QueryStatus::Error);
}

#[tokio::test]
async fn error_entries_are_retried_by_next_ensure() {
    let cache = QueryCache::default();
    let key = QueryKey::detail(7);
    let calls = Arc::new(AtomicUsize::new(0));

    let attempts = Arc::clone(&calls);
    let mut handle = cache.ensure(key.clone(), move || async move {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(CarteleraError::Remote { status: 503 })
    });
    assert_eq!(handle.settled().await.status, QueryStatus::Error);

    let attempts = Arc::clone(&calls);
    let mut handle = cache.ensure(key.clone(), move || async move {
        attempts.fetch_add(1, Ordering::SeqCst);
        Ok(gallery(&["recovered"]))
    });
    let settled = handle.settled().await;

    assert_eq!(settled.status, QueryStatus::Success);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// De-duplication
// =============================================================================

#[tokio::test]
async fn concurrent_ensure_calls_share_one_fetch() {
    let cache = QueryCache::default();
    let key = QueryKey::list(ListCategory::Popular, 1);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut first = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::from_millis(50), "shared")
    });
    let mut second = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::from_millis(50), "other")
    });

    let (a, b) = tokio::join!(first.settled(), second.settled());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(a.gallery().unwrap(), ["shared".to_string()]);
    assert_eq!(b.gallery().unwrap(), ["shared".to_string()]);
}

#[tokio::test]
async fn fresh_success_is_served_without_refetch() {
    let cache = QueryCache::default();
    let key = QueryKey::detail(42);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handle = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "v1")
    });
    handle.settled().await;

    let mut again = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "v2")
    });
    let settled = again.settled().await;

    // Default staleness: fresh for the process lifetime.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(settled.gallery().unwrap(), ["v1".to_string()]);
}

// =============================================================================
// Staleness
// =============================================================================

#[tokio::test]
async fn stale_success_is_refetched() {
    let config = QueryCacheConfig::new().staleness(Duration::from_millis(30));
    let cache = QueryCache::new(&config);
    let key = QueryKey::detail(9);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handle = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "old")
    });
    handle.settled().await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    let mut handle = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "new")
    });
    let settled = handle.settled().await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(settled.gallery().unwrap(), ["new".to_string()]);
}

// =============================================================================
// Invalidation and stale-result suppression
// =============================================================================

#[tokio::test]
async fn superseded_fetch_result_is_discarded() {
    let cache = QueryCache::default();
    let key = QueryKey::list(ListCategory::Upcoming, 1);
    let calls = Arc::new(AtomicUsize::new(0));

    // Slow fetch, then invalidate while it is in flight.
    let _stale = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::from_millis(80), "stale")
    });
    cache.invalidate(&key);

    // A fresh ensure starts a new fetch despite the in-flight one.
    let mut current = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "current")
    });
    let settled = current.settled().await;
    assert_eq!(settled.gallery().unwrap(), ["current".to_string()]);

    // Let the superseded fetch complete; it must not overwrite.
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(
        cache.get(&key).gallery().unwrap(),
        ["current".to_string()]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn suppressed_fetch_without_successor_settles_idle() {
    let cache = QueryCache::default();
    let key = QueryKey::detail(11);

    let mut handle = cache.ensure(key.clone(), || async {
        tokio::time::sleep(Duration::from_millis(40)).await;
        Ok(gallery(&["too-late"]))
    });
    cache.invalidate(&key);

    let settled = handle.settled().await;
    assert_eq!(settled.status, QueryStatus::Idle);
    assert!(settled.data.is_none());
}

#[tokio::test]
async fn invalidate_keeps_data_but_forces_refetch() {
    let cache = QueryCache::default();
    let key = QueryKey::detail(12);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handle = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "v1")
    });
    handle.settled().await;

    cache.invalidate(&key);

    // Data remains visible until replaced.
    let snapshot = cache.get(&key);
    assert_eq!(snapshot.status, QueryStatus::Success);
    assert_eq!(snapshot.gallery().unwrap(), ["v1".to_string()]);

    let mut handle = cache.ensure(key.clone(), {
        let calls = Arc::clone(&calls);
        move || counting_fetch(&calls, Duration::ZERO, "v2")
    });
    let settled = handle.settled().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(settled.gallery().unwrap(), ["v2".to_string()]);
}

// =============================================================================
// Key independence
// =============================================================================

#[tokio::test]
async fn one_keys_failure_leaves_siblings_untouched() {
    let cache = QueryCache::default();
    let ok_key = QueryKey::list(ListCategory::Popular, 1);
    let bad_key = QueryKey::list(ListCategory::TopRated, 1);

    let mut ok = cache.ensure(ok_key.clone(), || async { Ok(gallery(&["fine"])) });
    let mut bad = cache.ensure(bad_key.clone(), || async {
        Err(CarteleraError::Remote { status: 500 })
    });
    let (ok_snapshot, bad_snapshot) = tokio::join!(ok.settled(), bad.settled());

    assert_eq!(ok_snapshot.status, QueryStatus::Success);
    assert_eq!(bad_snapshot.status, QueryStatus::Error);
    assert_eq!(cache.get(&ok_key).status, QueryStatus::Success);
}

#[tokio::test]
async fn clear_evicts_entries() {
    let cache = QueryCache::default();
    let key = QueryKey::detail(603);

    let mut handle = cache.ensure(key.clone(), || async { Ok(gallery(&["a"])) });
    handle.settled().await;
    assert_eq!(cache.get(&key).status, QueryStatus::Success);

    cache.clear();
    assert_eq!(cache.get(&key).status, QueryStatus::Idle);
}
