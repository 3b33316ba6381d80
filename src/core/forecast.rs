//! Forecast result structure holding timestamped point predictions.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// Point forecasts for future periods, with optional prediction
/// intervals.
///
/// Timestamps continue the cadence of the series the model was fitted
/// on; `values[i]` is the prediction for `timestamps[i]`.
#[derive(Debug, Clone, Default)]
pub struct Forecast {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create a forecast from timestamps and point predictions.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            timestamps,
            values,
            lower: None,
            upper: None,
        })
    }

    /// Attach symmetric prediction interval bounds.
    pub fn with_intervals(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != self.values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.values.len(),
                got: lower.len(),
            });
        }
        if upper.len() != self.values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: self.values.len(),
                got: upper.len(),
            });
        }
        self.lower = Some(lower);
        self.upper = Some(upper);
        Ok(self)
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Whether the forecast holds no predictions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forecast timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Point predictions.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (timestamp, prediction) pairs.
    pub fn points(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }

    /// Whether prediction intervals are attached.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Lower interval bounds, if attached.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Upper interval bounds, if attached.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }
}
