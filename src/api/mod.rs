//! API Module
//!
//! HTTP handlers and routing for the coachdesk REST API.
//!
//! # Endpoints
//! - `GET|POST /athletes/:athlete/events/:event/results` - Result history
//! - `POST /athletes/:athlete/events/:event/predictions` - Trend prediction
//! - `GET /athletes/:athlete/predictions` - Persisted predictions
//! - `GET /cache/stats`, `DELETE /cache[/keys/:key|/prefix/:prefix]` - Cache control
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
