//! API Handlers
//!
//! HTTP request handlers for each coachdesk endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::cache::{athlete_prefix, results_key, ReadThroughCache};
use crate::config::Config;
use crate::error::{CoachError, Result};
use crate::models::{
    CacheStatsResponse, HealthResponse, InvalidateResponse, PredictRequest,
    PredictionListResponse, PredictionResponse, RecordResultRequest, RecordResultResponse,
    ResultsResponse,
};
use crate::records::{MemoryPredictionLog, PredictionSink, ResultSource};
use crate::trend::{HistoricalResult, TrendPredictor};

/// Cache of per-athlete, per-event result histories.
pub type HistoryCache = ReadThroughCache<Vec<HistoricalResult>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache in front of `results`
    pub cache: Arc<HistoryCache>,
    /// Result history store
    pub results: Arc<dyn ResultSource>,
    /// Where predictions are persisted
    pub predictions: Arc<dyn PredictionSink>,
    pub predictor: TrendPredictor,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        cache: HistoryCache,
        results: Arc<dyn ResultSource>,
        predictions: Arc<dyn PredictionSink>,
        predictor: TrendPredictor,
    ) -> Self {
        Self {
            cache: Arc::new(cache),
            results,
            predictions,
            predictor,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Predictions are kept in an in-memory log.
    pub fn from_config(config: &Config, results: Arc<dyn ResultSource>) -> Self {
        Self::new(
            ReadThroughCache::new(config.cache_ttl()),
            results,
            Arc::new(MemoryPredictionLog::new()),
            TrendPredictor::new(config.confidence_pct),
        )
    }
}

/// Reads one history through the cache.
async fn cached_history(
    state: &AppState,
    athlete_id: &str,
    event: &str,
) -> Result<Vec<HistoricalResult>> {
    let key = results_key(athlete_id, event);
    let source = state.results.clone();

    state
        .cache
        .get(&key, || async move {
            source
                .fetch_results(athlete_id, event)
                .await
                .map_err(|e| match e {
                    CoachError::FetchFailure(_) => e,
                    other => CoachError::FetchFailure(other.to_string()),
                })
        })
        .await
        .inspect_err(|e| warn!("History fetch failed for {}: {}", key, e))
}

/// Handler for GET /athletes/:athlete/events/:event/results
pub async fn results_handler(
    State(state): State<AppState>,
    Path((athlete_id, event)): Path<(String, String)>,
) -> Result<Json<ResultsResponse>> {
    let results = cached_history(&state, &athlete_id, &event).await?;

    Ok(Json(ResultsResponse {
        athlete_id,
        event,
        results,
    }))
}

/// Handler for POST /athletes/:athlete/events/:event/results
///
/// Records a result, then drops every cached read for the athlete.
pub async fn record_result_handler(
    State(state): State<AppState>,
    Path((athlete_id, event)): Path<(String, String)>,
    Json(req): Json<RecordResultRequest>,
) -> Result<Json<RecordResultResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CoachError::InvalidRequest(error_msg));
    }

    state
        .results
        .record_result(&athlete_id, &event, req.into_result())
        .await?;

    let invalidated = state
        .cache
        .invalidate_prefix(&athlete_prefix(&athlete_id))
        .await;
    info!("Recorded result for athlete {} in {}", athlete_id, event);

    Ok(Json(RecordResultResponse::new(
        &athlete_id,
        &event,
        invalidated,
    )))
}

/// Handler for POST /athletes/:athlete/events/:event/predictions
///
/// Predicts from the cached history and persists the prediction record.
pub async fn predict_handler(
    State(state): State<AppState>,
    Path((athlete_id, event)): Path<(String, String)>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictionResponse>> {
    let history = cached_history(&state, &athlete_id, &event).await?;
    let prediction = state.predictor.predict(&history, req.target_date)?;

    let record = prediction.to_record(event.clone(), Utc::now());
    state
        .predictions
        .save_prediction(&athlete_id, record.clone())
        .await?;
    info!(
        "Prediction for athlete {} in {}: {:.3}",
        athlete_id, event, prediction.predicted_value
    );

    Ok(Json(PredictionResponse {
        athlete_id,
        event,
        prediction,
        record,
    }))
}

/// Handler for GET /athletes/:athlete/predictions
pub async fn list_predictions_handler(
    State(state): State<AppState>,
    Path(athlete_id): Path<String>,
) -> Result<Json<PredictionListResponse>> {
    let predictions = state.predictions.list_predictions(&athlete_id).await?;
    Ok(Json(PredictionListResponse {
        athlete_id,
        predictions,
    }))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.cache.stats().await;
    Json(CacheStatsResponse::new(
        stats,
        state.cache.default_ttl().as_secs(),
    ))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let removed = state.cache.clear().await;
    Json(InvalidateResponse::new("all entries", removed))
}

/// Handler for DELETE /cache/keys/:key
pub async fn invalidate_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = usize::from(state.cache.invalidate(&key).await);
    Json(InvalidateResponse::new(format!("key '{}'", key), removed))
}

/// Handler for DELETE /cache/prefix/:prefix
pub async fn invalidate_prefix_handler(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate_prefix(&prefix).await;
    Json(InvalidateResponse::new(format!("prefix '{}'", prefix), removed))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
