//! Trend Module
//!
//! Recency-weighted linear regression over an athlete's result history.

mod model;
mod predictor;
mod sample;


pub use model::{TrendDirection, TrendModel};
pub use predictor::{
    Prediction, PredictionRecord, TrendPredictor, DEFAULT_CONFIDENCE_PCT, MODEL_IDENTIFIER,
};
pub use sample::{
    days_between, derive_samples, sort_chronologically, HistoricalResult, PerformanceSample,
};
