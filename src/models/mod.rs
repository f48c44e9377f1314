//! Request and Response models for the coachdesk API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PredictRequest, RecordResultRequest};
pub use responses::{
    CacheStatsResponse, HealthResponse, InvalidateResponse, PredictionListResponse,
    PredictionResponse, RecordResultResponse, ResultsResponse,
};
