//! Cache Statistics Module
//!
//! Entry freshness counts plus cumulative hit/miss counters.

use serde::Serialize;

// == Cache Stats ==
/// Diagnostic snapshot of the cache.
///
/// Expired entries stay in the map until they are read, invalidated or
/// cleared, so `expired_entries` can be non-zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of entries in the map
    pub total_entries: usize,
    /// Entries still within the TTL they were written with
    pub fresh_entries: usize,
    /// Entries past their TTL but not yet removed
    pub expired_entries: usize,
    /// Reads served from the map
    pub hits: u64,
    /// Reads that invoked the fetch function
    pub misses: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
