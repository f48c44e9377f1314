//! Prediction Sink Module
//!
//! Durable log of predictions made for an athlete.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::trend::PredictionRecord;

// == Prediction Sink Trait ==
#[async_trait]
pub trait PredictionSink: Send + Sync {
    /// Persists one prediction record for `athlete_id`.
    async fn save_prediction(&self, athlete_id: &str, record: PredictionRecord) -> Result<()>;

    /// Returns the records saved for `athlete_id`, oldest first.
    async fn list_predictions(&self, athlete_id: &str) -> Result<Vec<PredictionRecord>>;
}

// == Memory Prediction Log ==
#[derive(Debug, Default)]
pub struct MemoryPredictionLog {
    records: RwLock<HashMap<String, Vec<PredictionRecord>>>,
}

impl MemoryPredictionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PredictionSink for MemoryPredictionLog {
    async fn save_prediction(&self, athlete_id: &str, record: PredictionRecord) -> Result<()> {
        self.records
            .write()
            .await
            .entry(athlete_id.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn list_predictions(&self, athlete_id: &str) -> Result<Vec<PredictionRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(athlete_id)
            .cloned()
            .unwrap_or_default())
    }
}
