//! Cache Entry Module
//!
//! Defines a stored fetch result together with the instant it was written.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached fetch result and its insertion metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the value was written
    pub stored_at: Instant,
    /// TTL in effect when the value was written, used for diagnostics
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `now`.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: now,
            ttl,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still fresh at `now` under `ttl`.
    ///
    /// Boundary condition: an entry is fresh iff `now - stored_at < ttl`, so it
    /// turns stale the moment the TTL has fully elapsed. A zero TTL is never
    /// fresh.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }

    // == Is Expired ==
    /// Checks the entry against the TTL it was written with.
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.is_fresh(now, self.ttl)
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fresh_within_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now, Duration::from_secs(10));

        assert!(entry.is_fresh(now, Duration::from_secs(10)));
        assert!(entry.is_fresh(now + Duration::from_secs(9), Duration::from_secs(10)));
        assert!(!entry.is_expired(now + Duration::from_secs(9)));
    }

    #[test]
    fn test_entry_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("value", now, Duration::from_secs(10));

        // Stale exactly when the TTL has elapsed
        assert!(!entry.is_fresh(now + Duration::from_secs(10), Duration::from_secs(10)));
        assert!(entry.is_expired(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_entry_zero_ttl_never_fresh() {
        let now = Instant::now();
        let entry = CacheEntry::new(1, now, Duration::ZERO);
        assert!(!entry.is_fresh(now, Duration::ZERO));
    }

    #[test]
    fn test_entry_reader_ttl_overrides_stored_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new(1, now, Duration::from_secs(60));
        let later = now + Duration::from_secs(5);

        assert!(!entry.is_fresh(later, Duration::from_secs(1)));
        assert!(!entry.is_expired(later));
    }

    #[test]
    fn test_entry_age() {
        let now = Instant::now();
        let entry = CacheEntry::new(1, now, Duration::from_secs(60));
        assert_eq!(entry.age(now + Duration::from_millis(250)), Duration::from_millis(250));

        // Earlier instants saturate to zero
        let later_entry = CacheEntry::new(2, now + Duration::from_secs(1), Duration::from_secs(60));
        assert_eq!(later_entry.age(now), Duration::ZERO);
    }
}
