//! Result Source Module
//!
//! Backing store for athlete result history.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{CoachError, Result};
use crate::trend::HistoricalResult;

// == Result Source Trait ==
/// Remote store of historical results, read through the cache.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Returns every result of `athlete_id` in `event`, in storage order.
    async fn fetch_results(&self, athlete_id: &str, event: &str) -> Result<Vec<HistoricalResult>>;

    /// Appends a result.
    async fn record_result(
        &self,
        athlete_id: &str,
        event: &str,
        result: HistoricalResult,
    ) -> Result<()>;
}

/// One seed row as stored in the JSON seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedResult {
    pub athlete_id: String,
    pub event: String,
    #[serde(flatten)]
    pub result: HistoricalResult,
}

type HistoryKey = (String, String);

// == Memory Result Store ==
/// In-memory result store.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: RwLock<HashMap<HistoryKey, Vec<HistoricalResult>>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed rows.
    ///
    /// Rows are held to the same rules as recorded results.
    pub fn from_seed(rows: Vec<SeedResult>) -> Result<Self> {
        let mut results: HashMap<HistoryKey, Vec<HistoricalResult>> = HashMap::new();
        for (index, row) in rows.into_iter().enumerate() {
            if let Some(error_msg) = row.result.validate() {
                return Err(CoachError::InvalidRequest(format!(
                    "Invalid seed row {} (athlete '{}', event '{}'): {}",
                    index, row.athlete_id, row.event, error_msg
                )));
            }
            results
                .entry((row.athlete_id, row.event))
                .or_default()
                .push(row.result);
        }
        Ok(Self {
            results: RwLock::new(results),
        })
    }

    /// Parses a JSON array of seed rows.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<SeedResult> = serde_json::from_str(json)
            .map_err(|e| CoachError::InvalidRequest(format!("Invalid seed data: {}", e)))?;
        Self::from_seed(rows)
    }

    /// Loads seed rows from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            CoachError::Internal(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let store = Self::from_json(&json)?;
        info!(
            "Seeded result store from {} ({} histories)",
            path.display(),
            store.results.read().await.len()
        );
        Ok(store)
    }
}

#[async_trait]
impl ResultSource for MemoryResultStore {
    async fn fetch_results(&self, athlete_id: &str, event: &str) -> Result<Vec<HistoricalResult>> {
        let results = self.results.read().await;
        Ok(results
            .get(&(athlete_id.to_string(), event.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn record_result(
        &self,
        athlete_id: &str,
        event: &str,
        result: HistoricalResult,
    ) -> Result<()> {
        self.results
            .write()
            .await
            .entry((athlete_id.to_string(), event.to_string()))
            .or_default()
            .push(result);
        Ok(())
    }
}
