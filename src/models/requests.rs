//! Request DTOs for the coachdesk API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::trend::HistoricalResult;

/// Request body for POST /athletes/:athlete/events/:event/results
#[derive(Debug, Clone, Deserialize)]
pub struct RecordResultRequest {
    /// When the performance happened (RFC 3339)
    pub date: DateTime<Utc>,
    /// Measured value, lower is better
    pub value: f64,
}

impl RecordResultRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        HistoricalResult::new(self.date, self.value).validate()
    }

    pub fn into_result(self) -> HistoricalResult {
        HistoricalResult::new(self.date, self.value)
    }
}

/// Request body for POST /athletes/:athlete/events/:event/predictions
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    /// Date to predict for (RFC 3339)
    pub target_date: DateTime<Utc>,
}
