//! Trend Model Module
//!
//! Weighted least-squares line fitted in (elapsed days, -value) space.

use serde::Serialize;

use crate::error::{CoachError, Result};
use crate::trend::PerformanceSample;

// == Trend Direction ==
/// Sign of the fitted slope, read for a lower-is-better metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Flat,
}

// == Trend Model ==
/// Fitted regression coefficients.
///
/// The line is fitted against the negated value, so a positive slope means the
/// raw value is going down over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    // == Fit ==
    /// Fits a weighted least-squares line through `samples`.
    ///
    /// `slope = (ΣwΣwxy − ΣwxΣwy) / (ΣwΣwx² − (Σwx)²)` and
    /// `intercept = (Σwy − slope·Σwx) / Σw`, with `x = elapsed_days`,
    /// `y = -value` and `w = weight`.
    ///
    /// # Errors
    /// - `InsufficientData` with fewer than two samples
    /// - `DegenerateInput` when every sample has the same `elapsed_days`
    pub fn fit(samples: &[PerformanceSample]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(CoachError::InsufficientData {
                found: samples.len(),
            });
        }

        let first_x = samples[0].elapsed_days;
        if samples.iter().all(|s| s.elapsed_days == first_x) {
            return Err(CoachError::DegenerateInput);
        }

        let mut sum_w = 0.0;
        let mut sum_wx = 0.0;
        let mut sum_wy = 0.0;
        let mut sum_wxx = 0.0;
        let mut sum_wxy = 0.0;

        for sample in samples {
            let w = f64::from(sample.weight);
            let x = sample.elapsed_days;
            let y = -sample.value;

            sum_w += w;
            sum_wx += w * x;
            sum_wy += w * y;
            sum_wxx += w * x * x;
            sum_wxy += w * x * y;
        }

        let denominator = sum_w * sum_wxx - sum_wx * sum_wx;
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(CoachError::DegenerateInput);
        }

        let slope = (sum_w * sum_wxy - sum_wx * sum_wy) / denominator;
        let intercept = (sum_wy - slope * sum_wx) / sum_w;

        Ok(Self { slope, intercept })
    }

    /// Fitted value in regression space (negated) at `elapsed_days`.
    pub fn fitted_at(&self, elapsed_days: f64) -> f64 {
        self.slope * elapsed_days + self.intercept
    }

    /// Predicted raw value at `elapsed_days`, with the negation undone.
    pub fn value_at(&self, elapsed_days: f64) -> f64 {
        -self.fitted_at(elapsed_days)
    }

    pub fn direction(&self) -> TrendDirection {
        if self.slope > 0.0 {
            TrendDirection::Improving
        } else if self.slope < 0.0 {
            TrendDirection::Declining
        } else {
            TrendDirection::Flat
        }
    }
}
