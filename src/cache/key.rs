//! Query Key Module
//!
//! Fallback cache-key derivation from the shape of a remote query.
//!
//! Explicit keys passed to [`ReadThroughCache::get`](super::ReadThroughCache::get)
//! are preferred. Derived keys follow a fixed, versioned rule:
//!
//! - document lookups: `v1:doc:<path>`
//! - collection queries: `v1:query:<path>` followed by `:<field><op><value>`
//!   filters joined with `&`, sorted so filter order does not change the key

use std::fmt;

/// Version tag prefixed to every derived key.
pub const KEY_VERSION: &str = "v1";

// == Filter ==
/// A single equality/comparison filter on a collection query.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryFilter {
    pub field: String,
    pub op: String,
    pub value: String,
}

impl QueryFilter {
    pub fn new(field: impl Into<String>, op: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Shorthand for an `==` filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "==", value)
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op, self.value)
    }
}

// == Query Key ==
/// Shape of a remote read, used to derive a cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKey {
    /// Single document lookup by full path
    Document { path: String },
    /// Collection query with optional filters
    Collection {
        path: String,
        filters: Vec<QueryFilter>,
    },
}

impl QueryKey {
    pub fn document(path: impl Into<String>) -> Self {
        Self::Document { path: path.into() }
    }

    pub fn collection(path: impl Into<String>, filters: Vec<QueryFilter>) -> Self {
        Self::Collection {
            path: path.into(),
            filters,
        }
    }

    // == Cache Key ==
    /// Builds the versioned cache key for this query.
    pub fn cache_key(&self) -> String {
        match self {
            QueryKey::Document { path } => format!("{KEY_VERSION}:doc:{path}"),
            QueryKey::Collection { path, filters } if filters.is_empty() => {
                format!("{KEY_VERSION}:query:{path}")
            }
            QueryKey::Collection { path, filters } => {
                let mut sorted: Vec<&QueryFilter> = filters.iter().collect();
                sorted.sort();
                let serialized = sorted
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join("&");
                format!("{KEY_VERSION}:query:{path}:{serialized}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key() {
        let key = QueryKey::document("teams/5/athletes/12");
        assert_eq!(key.cache_key(), "v1:doc:teams/5/athletes/12");
    }

    #[test]
    fn test_collection_key_without_filters() {
        let key = QueryKey::collection("results", vec![]);
        assert_eq!(key.cache_key(), "v1:query:results");
    }

    #[test]
    fn test_collection_key_with_filters() {
        let key = QueryKey::collection(
            "results",
            vec![QueryFilter::eq("athleteId", "12"), QueryFilter::eq("event", "400m")],
        );
        assert_eq!(key.cache_key(), "v1:query:results:athleteId==12&event==400m");
    }

    #[test]
    fn test_collection_key_ignores_filter_order() {
        let a = QueryKey::collection(
            "results",
            vec![QueryFilter::eq("event", "400m"), QueryFilter::new("date", ">=", "2024-01-01")],
        );
        let b = QueryKey::collection(
            "results",
            vec![QueryFilter::new("date", ">=", "2024-01-01"), QueryFilter::eq("event", "400m")],
        );
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_document_and_collection_keys_do_not_collide() {
        let doc = QueryKey::document("results");
        let col = QueryKey::collection("results", vec![]);
        assert_ne!(doc.cache_key(), col.cache_key());
    }
}
