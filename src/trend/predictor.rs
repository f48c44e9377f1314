//! Trend Predictor Module
//!
//! Extrapolates a performance value for a future date from result history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoachError, Result};
use crate::trend::{
    days_between, derive_samples, sort_chronologically, HistoricalResult, TrendDirection,
    TrendModel,
};

/// Identifier stored alongside persisted predictions.
pub const MODEL_IDENTIFIER: &str = "weighted-linear-regression/v1";

/// Default half-width of the prediction band.
pub const DEFAULT_CONFIDENCE_PCT: f64 = 0.05;

// == Prediction ==
/// Output of a single prediction.
///
/// `lower` and `upper` are a fixed percentage band around the predicted value.
/// They are not derived from the residuals of the fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_value: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence_pct: f64,
    pub model: TrendModel,
    pub direction: TrendDirection,
    pub sample_count: usize,
    pub baseline_date: DateTime<Utc>,
    pub target_date: DateTime<Utc>,
    /// Days between the latest result and the target, 0 when the target is
    /// inside the observed range
    pub days_beyond_history: f64,
}

impl Prediction {
    /// Builds the auditable record handed to a prediction sink.
    pub fn to_record(
        &self,
        event_category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> PredictionRecord {
        PredictionRecord {
            event_category: event_category.into(),
            target_date: self.target_date,
            predicted_value: self.predicted_value,
            confidence: self.confidence_pct,
            model_identifier: MODEL_IDENTIFIER.to_string(),
            created_at,
        }
    }
}

// == Prediction Record ==
/// Persisted form of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub event_category: String,
    pub target_date: DateTime<Utc>,
    pub predicted_value: f64,
    pub confidence: f64,
    pub model_identifier: String,
    pub created_at: DateTime<Utc>,
}

// == Trend Predictor ==
/// Weighted linear regression predictor.
///
/// Stateless apart from the band width, so repeated calls with the same input
/// return identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPredictor {
    confidence_pct: f64,
}

impl Default for TrendPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_PCT)
    }
}

impl TrendPredictor {
    /// Creates a predictor with the given band half-width (0.05 = ±5%).
    pub fn new(confidence_pct: f64) -> Self {
        Self { confidence_pct }
    }

    pub fn confidence_pct(&self) -> f64 {
        self.confidence_pct
    }

    // == Predict ==
    /// Predicts the value for `target_date` from `history`.
    ///
    /// `history` may be in any order. Extrapolation is not bounded; a target
    /// far past the observed range is allowed and only logged.
    ///
    /// # Errors
    /// - `InsufficientData` with fewer than two results
    /// - `DegenerateInput` when every result falls on the same instant
    /// - `InvalidRequest` when a value is not finite
    pub fn predict(
        &self,
        history: &[HistoricalResult],
        target_date: DateTime<Utc>,
    ) -> Result<Prediction> {
        if history.len() < 2 {
            return Err(CoachError::InsufficientData {
                found: history.len(),
            });
        }

        let sorted = sort_chronologically(history);
        let samples = derive_samples(&sorted)?;
        let model = TrendModel::fit(&samples)?;

        let baseline_date = sorted[0].date;
        let latest_date = sorted[sorted.len() - 1].date;
        let target_elapsed = days_between(baseline_date, target_date);
        let predicted_value = model.value_at(target_elapsed);

        let observed_span = days_between(baseline_date, latest_date);
        let days_beyond_history = days_between(latest_date, target_date).max(0.0);
        if days_beyond_history > observed_span {
            warn!(
                "Extrapolating {:.1} days past history spanning {:.1} days",
                days_beyond_history, observed_span
            );
        }

        let a = predicted_value * (1.0 - self.confidence_pct);
        let b = predicted_value * (1.0 + self.confidence_pct);

        debug!(
            "Predicted {:.3} at day {:.1} (slope {:.5}, {} samples)",
            predicted_value,
            target_elapsed,
            model.slope,
            samples.len()
        );

        Ok(Prediction {
            predicted_value,
            lower: a.min(b),
            upper: a.max(b),
            confidence_pct: self.confidence_pct,
            direction: model.direction(),
            model,
            sample_count: samples.len(),
            baseline_date,
            target_date,
            days_beyond_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const EPS: f64 = 1e-9;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn linear_history() -> Vec<HistoricalResult> {
        vec![
            HistoricalResult::new(day(0), 60.0),
            HistoricalResult::new(day(10), 58.0),
            HistoricalResult::new(day(20), 56.0),
        ]
    }

    #[test]
    fn test_linear_series_predicts_54_at_day_30() {
        let prediction = TrendPredictor::default()
            .predict(&linear_history(), day(30))
            .unwrap();

        assert!((prediction.predicted_value - 54.0).abs() < EPS);
        assert!(prediction.model.slope > 0.0);
        assert_eq!(prediction.direction, TrendDirection::Improving);
        assert_eq!(prediction.sample_count, 3);
        assert_eq!(prediction.baseline_date, day(0));
        assert!((prediction.days_beyond_history - 10.0).abs() < EPS);
    }

    #[test]
    fn test_confidence_band() {
        let prediction = TrendPredictor::new(0.05)
            .predict(&linear_history(), day(30))
            .unwrap();

        assert!((prediction.lower - 51.3).abs() < 1e-6);
        assert!((prediction.upper - 56.7).abs() < 1e-6);
        assert_eq!(prediction.confidence_pct, 0.05);
    }

    #[test]
    fn test_configurable_confidence() {
        let prediction = TrendPredictor::new(0.0)
            .predict(&linear_history(), day(30))
            .unwrap();
        assert_eq!(prediction.lower, prediction.upper);
    }

    #[test]
    fn test_insufficient_data() {
        let predictor = TrendPredictor::default();
        assert_eq!(
            predictor.predict(&[], day(1)),
            Err(CoachError::InsufficientData { found: 0 })
        );
        assert_eq!(
            predictor.predict(&linear_history()[..1], day(1)),
            Err(CoachError::InsufficientData { found: 1 })
        );
    }

    #[test]
    fn test_degenerate_input() {
        let history = vec![
            HistoricalResult::new(day(3), 60.0),
            HistoricalResult::new(day(3), 58.0),
        ];
        assert_eq!(
            TrendPredictor::default().predict(&history, day(10)),
            Err(CoachError::DegenerateInput)
        );
    }

    #[test]
    fn test_unsorted_input_matches_sorted() {
        let shuffled = vec![
            HistoricalResult::new(day(20), 56.0),
            HistoricalResult::new(day(0), 60.0),
            HistoricalResult::new(day(10), 58.0),
        ];
        let predictor = TrendPredictor::default();

        let a = predictor.predict(&shuffled, day(30)).unwrap();
        let b = predictor.predict(&linear_history(), day(30)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_repeat_calls_are_bit_identical() {
        let history = vec![
            HistoricalResult::new(day(0), 61.3),
            HistoricalResult::new(day(4), 60.9),
            HistoricalResult::new(day(9), 60.1),
            HistoricalResult::new(day(15), 60.4),
        ];
        let predictor = TrendPredictor::default();

        let a = predictor.predict(&history, day(40)).unwrap();
        let b = predictor.predict(&history, day(40)).unwrap();

        assert_eq!(a.predicted_value.to_bits(), b.predicted_value.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_target_inside_history() {
        let prediction = TrendPredictor::default()
            .predict(&linear_history(), day(5))
            .unwrap();
        assert!((prediction.predicted_value - 59.0).abs() < EPS);
        assert_eq!(prediction.days_beyond_history, 0.0);
    }

    #[test]
    fn test_far_extrapolation_is_not_capped() {
        let prediction = TrendPredictor::default()
            .predict(&linear_history(), day(400))
            .unwrap();
        // 60 - 0.2 * 400
        assert!((prediction.predicted_value + 20.0).abs() < 1e-6);
        assert!(prediction.lower <= prediction.upper);
    }

    #[test]
    fn test_to_record() {
        let prediction = TrendPredictor::default()
            .predict(&linear_history(), day(30))
            .unwrap();
        let created_at = day(21);

        let record = prediction.to_record("400m", created_at);

        assert_eq!(record.event_category, "400m");
        assert_eq!(record.target_date, day(30));
        assert_eq!(record.predicted_value, prediction.predicted_value);
        assert_eq!(record.confidence, 0.05);
        assert_eq!(record.model_identifier, MODEL_IDENTIFIER);
        assert_eq!(record.created_at, created_at);
    }
}
