//! Error types for coachdesk
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Coach Error Enum ==
/// Unified error type for the cache, the predictor and the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoachError {
    /// Fewer than two historical samples were supplied
    #[error("Insufficient data: need at least 2 samples, found {found}")]
    InsufficientData { found: usize },

    /// Every sample sits at the same elapsed-day offset
    #[error("Degenerate input: all samples share the same date")]
    DegenerateInput,

    /// The wrapped remote read failed
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CoachError {
    fn into_response(self) -> Response {
        let status = match &self {
            CoachError::InsufficientData { .. } | CoachError::DegenerateInput => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CoachError::FetchFailure(_) => StatusCode::BAD_GATEWAY,
            CoachError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CoachError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for coachdesk.
pub type Result<T> = std::result::Result<T, CoachError>;
