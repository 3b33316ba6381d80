//! Stationarity assessment and conditional differencing.
//!
//! A series enters the ARIMA pipeline through [`check_stationarity`]:
//! the ADF test decides whether differencing is needed, differencing is
//! applied one order at a time, and the test outcome at every stage is
//! kept for reporting.

mod adf;
mod diff;

pub use adf::{adf_test, mackinnon_p, AdfOutcome, MIN_OBSERVATIONS};
pub use diff::{difference, integrate};

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use log::debug;

/// Configuration for the stationarity check.
#[derive(Debug, Clone)]
pub struct StationarityConfig {
    /// Significance threshold for rejecting the unit-root null.
    pub significance: f64,
    /// Maximum differencing order before giving up.
    pub max_d: usize,
    /// Explicit ADF lag order; `None` uses the default ⌊∛(n−1)⌋.
    pub adf_lags: Option<usize>,
}

impl Default for StationarityConfig {
    fn default() -> Self {
        Self {
            significance: 0.05,
            max_d: 2,
            adf_lags: None,
        }
    }
}

/// Outcome of the stationarity stage: the differencing order that made
/// the series stationary and the test trail that led there.
#[derive(Debug, Clone)]
pub struct DifferencingResult {
    original: Vec<f64>,
    differenced: Vec<f64>,
    d: usize,
    tests: Vec<AdfOutcome>,
}

impl DifferencingResult {
    /// The untouched input values.
    pub fn original(&self) -> &[f64] {
        &self.original
    }

    /// The series after `d` differencing passes
    /// (length = original length − d).
    pub fn differenced(&self) -> &[f64] {
        &self.differenced
    }

    /// Differencing order that achieved stationarity.
    pub fn d(&self) -> usize {
        self.d
    }

    /// Whether any differencing was applied.
    pub fn is_differenced(&self) -> bool {
        self.d > 0
    }

    /// ADF outcomes per stage: `tests()[i]` is the test after `i`
    /// differencing passes.
    pub fn tests(&self) -> &[AdfOutcome] {
        &self.tests
    }
}

/// Assess stationarity and difference until the ADF test rejects the
/// unit-root null.
///
/// # Errors
/// - `InsufficientData` when the series is shorter than
///   [`MIN_OBSERVATIONS`] (or becomes too short to retest)
/// - `NonStationary` when the cap `max_d` is reached and the test still
///   does not reject
/// - `InvalidParameter` for a significance outside (0, 1)
pub fn check_stationarity(
    series: &TimeSeries,
    config: &StationarityConfig,
) -> Result<DifferencingResult> {
    if !(config.significance > 0.0 && config.significance < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "significance must be in (0, 1), got {}",
            config.significance
        )));
    }

    let original = series.values().to_vec();
    let mut current = original.clone();
    let mut tests = Vec::new();

    for d in 0.. {
        let outcome = adf_test(&current, config.adf_lags)?;
        debug!(
            "ADF at d={}: statistic={:.4}, p-value={:.4}",
            d, outcome.statistic, outcome.p_value
        );
        let stationary = outcome.rejects_unit_root(config.significance);
        tests.push(outcome);

        if stationary {
            return Ok(DifferencingResult {
                original,
                differenced: current,
                d,
                tests,
            });
        }
        if d == config.max_d {
            break;
        }
        current = difference(&current, 1);
    }

    Err(ForecastError::NonStationary { max_d: config.max_d })
}
