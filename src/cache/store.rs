//! Read-Through Cache Module
//!
//! Keyed store of fetch results with lazy TTL expiry and prefix invalidation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, QueryKey};
use crate::clock::{Clock, SystemClock};

#[derive(Debug)]
struct CacheInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Bumped by every invalidation; a fetch started under an older
    /// generation does not write its result
    generation: u64,
}

// == Read-Through Cache ==
/// Cache placed in front of remote reads.
///
/// A read returns the stored value when it is fresh and otherwise runs the
/// supplied fetch function and stores its result. Staleness is only checked
/// when an entry is read; nothing sweeps the map in the background.
///
/// The lock is released while the fetch runs. Two concurrent misses on the
/// same key therefore both fetch, and the later write wins. A fetch that
/// overlaps `invalidate`, `invalidate_prefix` or `clear` returns its value
/// to the caller but does not store it.
#[derive(Debug)]
pub struct ReadThroughCache<V, C = SystemClock>
where
    C: Clock,
{
    inner: RwLock<CacheInner<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    default_ttl: Duration,
    clock: C,
}

impl<V> ReadThroughCache<V, SystemClock>
where
    V: Clone + Send + Sync,
{
    // == Constructor ==
    /// Creates an empty cache using the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL applied by [`get`](Self::get) and [`get_query`](Self::get_query)
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, SystemClock)
    }
}

impl<V, C> ReadThroughCache<V, C>
where
    V: Clone + Send + Sync,
    C: Clock,
{
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: C) -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                entries: HashMap::new(),
                generation: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            default_ttl,
            clock,
        }
    }

    /// TTL used when the caller does not pass one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Get ==
    /// Returns the cached value for `key`, fetching it on a miss.
    ///
    /// Errors from `fetch` are returned unchanged and nothing is written.
    pub async fn get<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.get_with_ttl(key, self.default_ttl, fetch).await
    }

    /// Same as [`get`](Self::get) with an explicit TTL for this read.
    pub async fn get_with_ttl<F, Fut, E>(&self, key: &str, ttl: Duration, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let now = self.clock.now();
        let generation = {
            let guard = self.inner.read().await;
            if let Some(entry) = guard.entries.get(key) {
                if entry.is_fresh(now, ttl) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Cache hit: {}", key);
                    return Ok(entry.value.clone());
                }
                debug!("Cache entry stale: {} (age {:?})", key, entry.age(now));
            }
            self.misses.fetch_add(1, Ordering::Relaxed);
            guard.generation
        };

        debug!("Cache miss, fetching: {}", key);
        let value = fetch().await?;

        let stored_at = self.clock.now();
        let mut guard = self.inner.write().await;
        if guard.generation == generation {
            guard
                .entries
                .insert(key.to_string(), CacheEntry::new(value.clone(), stored_at, ttl));
        } else {
            debug!("Cache invalidated during fetch, not storing: {}", key);
        }

        Ok(value)
    }

    // == Get Query ==
    /// Reads through the cache using a key derived from the query shape.
    ///
    /// Derived keys are best-effort; callers that need exact control over
    /// invalidation should use [`get`](Self::get) with an explicit key.
    pub async fn get_query<F, Fut, E>(&self, query: &QueryKey, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = query.cache_key();
        self.get(&key, fetch).await
    }

    // == Invalidate ==
    /// Removes a single entry. Returns whether it existed.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        let removed = guard.entries.remove(key).is_some();
        if removed {
            info!("Cache invalidated: {}", key);
        }
        removed
    }

    // == Invalidate Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        let before = guard.entries.len();
        guard.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - guard.entries.len();

        info!("Cache prefix invalidated: {} ({} entries)", prefix, removed);
        removed
    }

    // == Clear ==
    /// Removes all entries. Hit/miss counters are kept.
    pub async fn clear(&self) -> usize {
        let mut guard = self.inner.write().await;
        guard.generation += 1;
        let removed = guard.entries.len();
        guard.entries.clear();

        info!("Cache cleared ({} entries)", removed);
        removed
    }

    // == Stats ==
    /// Returns a diagnostic snapshot. Does not remove expired entries.
    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let guard = self.inner.read().await;

        let expired = guard
            .entries
            .values()
            .filter(|entry| entry.is_expired(now))
            .count();

        CacheStats {
            total_entries: guard.entries.len(),
            fresh_entries: guard.entries.len() - expired,
            expired_entries: expired,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Returns true if an entry exists for `key`, fresh or not.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.entries.contains_key(key)
    }

    /// Number of entries, including expired ones.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}
