//! Coachdesk - athlete result caching and performance trend prediction
//!
//! Provides a read-through TTL cache for remote reads and a weighted linear
//! regression predictor for future performance values.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod trend;

pub use api::AppState;
pub use cache::ReadThroughCache;
pub use config::Config;
pub use trend::TrendPredictor;
