//! Sample Module
//!
//! Historical results and the weighted regression points derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

const MS_PER_DAY: f64 = 86_400_000.0;

// == Historical Result ==
/// One recorded performance for a single event category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalResult {
    /// When the performance happened
    pub date: DateTime<Utc>,
    /// Measured value, lower is better (e.g. a race time in seconds)
    pub value: f64,
}

impl HistoricalResult {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }

    /// Checks that the value is a finite, non-negative measurement.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !self.value.is_finite() {
            return Some("Value must be a finite number".to_string());
        }
        if self.value < 0.0 {
            return Some("Value cannot be negative".to_string());
        }
        None
    }
}

// == Performance Sample ==
/// A regression point: offset from the baseline date, raw value and weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceSample {
    /// Days since the earliest result (fractional)
    pub elapsed_days: f64,
    /// Raw measured value
    pub value: f64,
    /// Recency weight, 1 for the oldest sample
    pub weight: u32,
}

/// Fractional days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

/// Sorts a copy of `history` chronologically.
///
/// Results on the same instant are ordered by value so the order is total and
/// the output does not depend on the caller's ordering.
pub fn sort_chronologically(history: &[HistoricalResult]) -> Vec<HistoricalResult> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.value.total_cmp(&b.value)));
    sorted
}

// == Derive Samples ==
/// Builds recency-weighted samples from chronologically sorted results.
///
/// The first result is the baseline (`elapsed_days = 0`) and sample `i` gets
/// weight `i + 1`.
pub fn derive_samples(sorted: &[HistoricalResult]) -> Result<Vec<PerformanceSample>> {
    let Some(baseline) = sorted.first() else {
        return Ok(Vec::new());
    };

    sorted
        .iter()
        .enumerate()
        .map(|(i, result)| {
            if !result.value.is_finite() {
                return Err(CoachError::InvalidRequest(format!(
                    "Result value at {} is not a finite number",
                    result.date.to_rfc3339()
                )));
            }
            Ok(PerformanceSample {
                elapsed_days: days_between(baseline.date, result.date),
                value: result.value,
                weight: i as u32 + 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_days_between_fractional() {
        let start = day(0);
        let end = start + Duration::hours(36);
        assert_eq!(days_between(start, end), 1.5);
        assert_eq!(days_between(end, start), -1.5);
    }

    #[test]
    fn test_sort_chronologically() {
        let history = vec![
            HistoricalResult::new(day(20), 56.0),
            HistoricalResult::new(day(0), 60.0),
            HistoricalResult::new(day(10), 58.0),
        ];

        let sorted = sort_chronologically(&history);
        let dates: Vec<_> = sorted.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(0), day(10), day(20)]);
    }

    #[test]
    fn test_sort_breaks_date_ties_by_value() {
        let a = vec![
            HistoricalResult::new(day(1), 50.0),
            HistoricalResult::new(day(1), 49.0),
        ];
        let b = vec![a[1].clone(), a[0].clone()];
        assert_eq!(sort_chronologically(&a), sort_chronologically(&b));
    }

    #[test]
    fn test_derive_samples_offsets_and_weights() {
        let sorted = vec![
            HistoricalResult::new(day(0), 60.0),
            HistoricalResult::new(day(10), 58.0),
            HistoricalResult::new(day(20), 56.0),
        ];

        let samples = derive_samples(&sorted).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].elapsed_days, 0.0);
        assert_eq!(samples[1].elapsed_days, 10.0);
        assert_eq!(samples[2].elapsed_days, 20.0);
        let weights: Vec<u32> = samples.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![1, 2, 3]);
    }

    #[test]
    fn test_validate() {
        assert!(HistoricalResult::new(day(0), 58.2).validate().is_none());
        assert!(HistoricalResult::new(day(0), 0.0).validate().is_none());
        assert!(HistoricalResult::new(day(0), -1.0).validate().is_some());
        assert!(HistoricalResult::new(day(0), f64::INFINITY).validate().is_some());
    }

    #[test]
    fn test_derive_samples_empty() {
        assert!(derive_samples(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_derive_samples_rejects_nan() {
        let sorted = vec![
            HistoricalResult::new(day(0), 60.0),
            HistoricalResult::new(day(1), f64::NAN),
        ];
        assert!(matches!(
            derive_samples(&sorted),
            Err(CoachError::InvalidRequest(_))
        ));
    }
}
