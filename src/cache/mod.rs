//! Cache Module
//!
//! Read-through caching of remote reads with lazy TTL expiry.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{QueryFilter, QueryKey, KEY_VERSION};
pub use stats::CacheStats;
pub use store::ReadThroughCache;

// == Key Helpers ==
/// Escapes `%` and `-` so an encoded segment never contains the key delimiter.
pub fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '-' => encoded.push_str("%2D"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Prefix shared by every cached read that belongs to one athlete.
pub fn athlete_prefix(athlete_id: &str) -> String {
    format!("athlete-{}-", encode_segment(athlete_id))
}

/// Cache key for one athlete's result history in one event category.
pub fn results_key(athlete_id: &str, event: &str) -> String {
    format!("{}results-{}", athlete_prefix(athlete_id), encode_segment(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_key_starts_with_athlete_prefix() {
        let key = results_key("12", "400m");
        assert_eq!(key, "athlete-12-results-400m");
        assert!(key.starts_with(&athlete_prefix("12")));
        assert!(!key.starts_with(&athlete_prefix("1")));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("400m"), "400m");
        assert_eq!(encode_segment("a-b"), "a%2Db");
        assert_eq!(encode_segment("50%"), "50%25");
        // Literal escape sequences are escaped again
        assert_ne!(encode_segment("a%2Db"), encode_segment("a-b"));
    }

    #[test]
    fn test_results_key_dashes_do_not_collide() {
        let a = results_key("7", "a-results-b");
        let b = results_key("7-results-a", "b");
        assert_ne!(a, b);
        assert!(a.starts_with(&athlete_prefix("7")));
        assert!(!b.starts_with(&athlete_prefix("7")));
    }

    #[test]
    fn test_athlete_prefix_does_not_cover_dashed_ids() {
        let key = results_key("1-x", "400m");
        assert!(!key.starts_with(&athlete_prefix("1")));
        assert!(key.starts_with(&athlete_prefix("1-x")));
    }
}
