//! API Routes
//!
//! Configures the Axum router with all coachdesk endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, health_handler, invalidate_key_handler,
    invalidate_prefix_handler, list_predictions_handler, predict_handler,
    record_result_handler, results_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /athletes/:athlete/events/:event/results` - Cached result history
/// - `POST /athletes/:athlete/events/:event/results` - Record a result
/// - `POST /athletes/:athlete/events/:event/predictions` - Predict a future value
/// - `GET /athletes/:athlete/predictions` - Persisted predictions
/// - `GET /cache/stats` - Cache diagnostics
/// - `DELETE /cache` - Clear the cache
/// - `DELETE /cache/keys/:key` - Invalidate one key
/// - `DELETE /cache/prefix/:prefix` - Invalidate a key prefix
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/athletes/:athlete/events/:event/results",
            get(results_handler).post(record_result_handler),
        )
        .route(
            "/athletes/:athlete/events/:event/predictions",
            post(predict_handler),
        )
        .route("/athletes/:athlete/predictions", get(list_predictions_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/keys/:key", delete(invalidate_key_handler))
        .route("/cache/prefix/:prefix", delete(invalidate_prefix_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
