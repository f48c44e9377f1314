//! Response DTOs for the coachdesk API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::trend::{HistoricalResult, Prediction, PredictionRecord};

/// Response body for GET /athletes/:athlete/events/:event/results
#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub athlete_id: String,
    pub event: String,
    pub results: Vec<HistoricalResult>,
}

/// Response body for POST /athletes/:athlete/events/:event/results
#[derive(Debug, Clone, Serialize)]
pub struct RecordResultResponse {
    pub message: String,
    /// Cache entries dropped for this athlete
    pub invalidated: usize,
}

impl RecordResultResponse {
    pub fn new(athlete_id: &str, event: &str, invalidated: usize) -> Self {
        Self {
            message: format!("Result recorded for athlete '{}' in '{}'", athlete_id, event),
            invalidated,
        }
    }
}

/// Response body for POST /athletes/:athlete/events/:event/predictions
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub athlete_id: String,
    pub event: String,
    #[serde(flatten)]
    pub prediction: Prediction,
    pub record: PredictionRecord,
}

/// Response body for GET /athletes/:athlete/predictions
#[derive(Debug, Clone, Serialize)]
pub struct PredictionListResponse {
    pub athlete_id: String,
    pub predictions: Vec<PredictionRecord>,
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub expired_entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub default_ttl_secs: u64,
}

impl CacheStatsResponse {
    pub fn new(stats: CacheStats, default_ttl_secs: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            total_entries: stats.total_entries,
            fresh_entries: stats.fresh_entries,
            expired_entries: stats.expired_entries,
            hits: stats.hits,
            misses: stats.misses,
            default_ttl_secs,
        }
    }
}

/// Response body for the cache invalidation endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(target: impl Into<String>, removed: usize) -> Self {
        Self {
            message: format!("Invalidated {}", target.into()),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::{HistoricalResult, TrendPredictor};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_cache_stats_response_hit_rate() {
        let stats = CacheStats {
            total_entries: 3,
            fresh_entries: 2,
            expired_entries: 1,
            hits: 8,
            misses: 2,
        };
        let resp = CacheStatsResponse::new(stats, 60);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expired_entries, 1);
        assert_eq!(resp.default_ttl_secs, 60);
    }

    #[test]
    fn test_prediction_response_flattens_prediction() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let history = vec![
            HistoricalResult::new(start, 60.0),
            HistoricalResult::new(start + Duration::days(10), 58.0),
        ];
        let prediction = TrendPredictor::default()
            .predict(&history, start + Duration::days(20))
            .unwrap();
        let record = prediction.to_record("400m", start);

        let resp = PredictionResponse {
            athlete_id: "7".to_string(),
            event: "400m".to_string(),
            prediction,
            record,
        };
        let json = serde_json::to_value(&resp).unwrap();

        assert!(json.get("predicted_value").is_some());
        assert_eq!(json["direction"], "improving");
        assert_eq!(json["record"]["event_category"], "400m");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_record_result_response_message() {
        let resp = RecordResultResponse::new("7", "400m", 2);
        assert!(resp.message.contains("'7'"));
        assert_eq!(resp.invalidated, 2);
    }
}
