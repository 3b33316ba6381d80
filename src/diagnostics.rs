//! Fit-quality metrics and residual diagnostics for a fitted model.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::{ForecastError, Result};
use crate::models::arima::FittedArima;
use crate::utils::stats::{autocorrelations, mean, variance};

/// Ljung-Box portmanteau test for remaining autocorrelation in the
/// residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct LjungBoxOutcome {
    /// Q statistic.
    pub statistic: f64,
    /// Chi-squared p-value; small values indicate residual
    /// autocorrelation the model failed to absorb.
    pub p_value: f64,
    /// Number of autocorrelation lags summed.
    pub lags: usize,
}

/// Fit-quality metrics computed from in-sample residuals.
#[derive(Debug, Clone)]
pub struct DiagnosticsReport {
    rmse: f64,
    mape: f64,
    residual_mean: f64,
    residual_variance: f64,
    residuals: Vec<f64>,
    ljung_box: Option<LjungBoxOutcome>,
}

impl DiagnosticsReport {
    /// Root-mean-square error over all defined residuals.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Mean absolute percentage error (×100) over the actual/fitted
    /// overlap, excluding points where the actual value is zero.
    pub fn mape(&self) -> f64 {
        self.mape
    }

    /// Mean of the defined residuals.
    pub fn residual_mean(&self) -> f64 {
        self.residual_mean
    }

    /// Sample variance of the defined residuals.
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// The defined residuals, in time order, for plotting.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Ljung-Box whiteness test, when the residual sample is long
    /// enough to support it.
    pub fn ljung_box(&self) -> Option<&LjungBoxOutcome> {
        self.ljung_box.as_ref()
    }
}

/// Compute diagnostics for a fitted model.
///
/// # Errors
/// - `DivisionByZero` when every overlapping actual value is zero, so
///   MAPE has no usable denominator
pub fn evaluate(model: &FittedArima) -> Result<DiagnosticsReport> {
    let actual = model.series().values();
    let fitted = model.fitted();

    let residuals: Vec<f64> = model
        .residuals()
        .iter()
        .copied()
        .filter(|r| r.is_finite())
        .collect();
    if residuals.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let rmse =
        (residuals.iter().map(|e| e * e).sum::<f64>() / residuals.len() as f64).sqrt();

    let mut percentage_sum = 0.0;
    let mut usable = 0usize;
    for (a, f) in actual.iter().zip(fitted.iter()) {
        if !f.is_finite() || *a == 0.0 {
            continue;
        }
        percentage_sum += ((a - f) / a).abs();
        usable += 1;
    }
    if usable == 0 {
        return Err(ForecastError::DivisionByZero(
            "every overlapping actual value is zero; MAPE is undefined".to_string(),
        ));
    }
    let mape = 100.0 * percentage_sum / usable as f64;

    let order = model.order();
    let fitted_params = order.p + order.q;
    let lags = 10.min(residuals.len() / 2);
    let ljung_box_outcome = if lags > fitted_params && residuals.len() > lags + 1 {
        ljung_box(&residuals, lags, fitted_params).ok()
    } else {
        None
    };

    Ok(DiagnosticsReport {
        rmse,
        mape,
        residual_mean: mean(&residuals),
        residual_variance: variance(&residuals),
        residuals,
        ljung_box: ljung_box_outcome,
    })
}

/// Ljung-Box test on a residual sequence.
///
/// `fitted_params` (p + q of the generating model) is subtracted from
/// the degrees of freedom.
pub fn ljung_box(
    residuals: &[f64],
    lags: usize,
    fitted_params: usize,
) -> Result<LjungBoxOutcome> {
    let n = residuals.len();
    if lags == 0 || lags <= fitted_params {
        return Err(ForecastError::InvalidParameter(
            "Ljung-Box lag count must exceed the fitted parameter count".to_string(),
        ));
    }
    if n <= lags + 1 {
        return Err(ForecastError::InsufficientData {
            needed: lags + 2,
            got: n,
        });
    }

    let acf = autocorrelations(residuals, lags);
    let nf = n as f64;
    let mut statistic = 0.0;
    for (k, r) in acf.iter().enumerate().skip(1) {
        if !r.is_finite() {
            return Err(ForecastError::Computation(
                "residual autocorrelation is undefined".to_string(),
            ));
        }
        statistic += r * r / (nf - k as f64);
    }
    statistic *= nf * (nf + 2.0);

    let dof = (lags - fitted_params) as f64;
    let p_value = 1.0 - ChiSquared::new(dof).unwrap().cdf(statistic);

    Ok(LjungBoxOutcome {
        statistic,
        p_value,
        lags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeSeries;
    use crate::models::arima::Arima;
    use approx::assert_relative_eq;

    fn fitted_model() -> FittedArima {
        let values: Vec<f64> = (0..40)
            .map(|i| 50.0 + 1.5 * i as f64 + 2.0 * (i as f64 * 0.8).sin())
            .collect();
        let ts = TimeSeries::monthly(2020, 1, values).unwrap();
        Arima::new(1, 1, 1).fit(&ts).unwrap()
    }

    #[test]
    fn metrics_are_non_negative() {
        let report = evaluate(&fitted_model()).unwrap();
        assert!(report.rmse() >= 0.0);
        assert!(report.mape() >= 0.0);
        assert!(report.residual_variance() >= 0.0);
    }

    #[test]
    fn residuals_match_the_model_tail() {
        let model = fitted_model();
        let report = evaluate(&model).unwrap();

        let defined: Vec<f64> = model
            .residuals()
            .iter()
            .copied()
            .filter(|r| r.is_finite())
            .collect();
        assert_eq!(report.residuals(), defined.as_slice());
    }

    #[test]
    fn rmse_matches_hand_computation() {
        let model = fitted_model();
        let report = evaluate(&model).unwrap();

        let defined: Vec<f64> = model
            .residuals()
            .iter()
            .copied()
            .filter(|r| r.is_finite())
            .collect();
        let expected =
            (defined.iter().map(|e| e * e).sum::<f64>() / defined.len() as f64).sqrt();
        assert_relative_eq!(report.rmse(), expected, epsilon = 1e-12);
    }

    #[test]
    fn zero_actuals_are_excluded_from_mape() {
        // a handful of exact zeros in the overlap must not poison MAPE
        let mut values: Vec<f64> = (0..30)
            .map(|i| 10.0 + 3.0 * (i as f64 * 0.9).sin())
            .collect();
        values[10] = 0.0;
        values[20] = 0.0;
        let ts = TimeSeries::monthly(2022, 1, values).unwrap();
        let model = Arima::new(1, 0, 0).fit(&ts).unwrap();

        let report = evaluate(&model).unwrap();
        assert!(report.mape().is_finite());
        assert!(report.mape() >= 0.0);
    }

    #[test]
    fn all_zero_actuals_make_mape_undefined() {
        let ts = TimeSeries::monthly(2022, 1, vec![0.0; 12]).unwrap();
        let model = Arima::new(0, 0, 0).fit(&ts).unwrap();
        assert!(matches!(
            evaluate(&model),
            Err(ForecastError::DivisionByZero(_))
        ));
    }

    #[test]
    fn ljung_box_p_value_is_a_probability() {
        let model = fitted_model();
        let report = evaluate(&model).unwrap();

        let outcome = report.ljung_box().expect("sample long enough");
        assert!(outcome.statistic >= 0.0);
        assert!((0.0..=1.0).contains(&outcome.p_value));
        assert!(outcome.lags > 0);
    }

    #[test]
    fn ljung_box_rejects_degenerate_lag_counts() {
        let residuals: Vec<f64> = (0..30).map(|i| (i as f64 * 1.1).sin()).collect();
        assert!(ljung_box(&residuals, 0, 0).is_err());
        assert!(ljung_box(&residuals, 3, 3).is_err());
        assert!(matches!(
            ljung_box(&residuals[..5], 10, 0),
            Err(ForecastError::InsufficientData { .. })
        ));
    }

    #[test]
    fn ljung_box_flags_correlated_residuals() {
        // strongly autocorrelated "residuals" should yield a tiny p-value
        let correlated: Vec<f64> = (0..60).map(|i| (i as f64 * 0.1).sin()).collect();
        let outcome = ljung_box(&correlated, 8, 0).unwrap();
        assert!(outcome.p_value < 0.01);
    }
}
