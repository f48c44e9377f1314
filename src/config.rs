//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for cached reads
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Half-width of the prediction band as a fraction of the predicted value
    pub confidence_pct: f64,
    /// Optional JSON file used to seed the in-memory result store
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CONFIDENCE_PCT` - Prediction band half-width (default: 0.05)
    /// - `SEED_FILE` - Path to a JSON seed of historical results (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config reading each variable through `lookup`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            cache_ttl: lookup("CACHE_TTL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            confidence_pct: lookup("CONFIDENCE_PCT")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|pct| pct.is_finite() && *pct >= 0.0)
                .unwrap_or(defaults.confidence_pct),
            seed_file: lookup("SEED_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 60,
            server_port: 3000,
            confidence_pct: 0.05,
            seed_file: None,
        }
    }
}
