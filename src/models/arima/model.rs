//! ARIMA (Autoregressive Integrated Moving Average) model estimation
//! and forecasting.

use std::fmt;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::stationarity::{difference, integrate};
use crate::utils::optimization::{minimize, SimplexOptions};

/// Model order (p, d, q): autoregressive lags, differencing passes and
/// moving-average lags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrder {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
}

impl ModelOrder {
    /// Create a new model order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Number of estimated parameters: AR + MA + intercept.
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

/// An ARIMA specification ready to be fitted.
#[derive(Debug, Clone)]
pub struct Arima {
    order: ModelOrder,
}

impl Arima {
    /// Create an ARIMA(p, d, q) specification.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            order: ModelOrder::new(p, d, q),
        }
    }

    /// Create a specification from an existing order.
    pub fn with_order(order: ModelOrder) -> Self {
        Self { order }
    }

    /// The specified order.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Fit the model to a series by conditional maximum likelihood.
    ///
    /// The series is differenced `d` times, then intercept, AR and MA
    /// coefficients are estimated by minimizing the conditional sum of
    /// squares with a bounded simplex search (equivalent to maximizing
    /// the conditional Gaussian likelihood).
    ///
    /// # Errors
    /// - `InsufficientData` when the series is too short for the order
    /// - `Convergence` when the optimizer fails to converge or yields
    ///   non-finite parameters
    pub fn fit(&self, series: &TimeSeries) -> Result<FittedArima> {
        let ModelOrder { p, d, q } = self.order;
        let values = series.values();
        let min_len = d + p.max(q) + 2;
        if values.len() < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: values.len(),
            });
        }

        let differenced = difference(values, d);
        let (intercept, ar, ma) = estimate(&differenced, p, q)?;

        // One-step-ahead predictions on the differenced scale.
        let start = p.max(q);
        let nd = differenced.len();
        let mut fitted_diff = vec![f64::NAN; nd];
        let mut diff_residuals = vec![0.0; nd];
        for t in start..nd {
            let mut pred = intercept;
            for (i, phi) in ar.iter().enumerate() {
                pred += phi * (differenced[t - 1 - i] - intercept);
            }
            for (i, theta) in ma.iter().enumerate() {
                pred += theta * diff_residuals[t - 1 - i];
            }
            fitted_diff[t] = pred;
            diff_residuals[t] = differenced[t] - pred;
        }

        let n_eff = nd - start;
        let css: f64 = diff_residuals[start..].iter().map(|e| e * e).sum();
        // floor keeps the log-likelihood finite for degenerate perfect fits
        let sigma2 = (css / n_eff as f64).max(1e-12);
        let k = self.order.num_params() as f64;
        let n_eff = n_eff as f64;
        let log_likelihood =
            -0.5 * n_eff * ((2.0 * std::f64::consts::PI).ln() + sigma2.ln() + 1.0);
        let aic = -2.0 * log_likelihood + 2.0 * k;
        let bic = -2.0 * log_likelihood + k * n_eff.ln();
        if !aic.is_finite() {
            return Err(ForecastError::Convergence(
                "information criteria are not finite".to_string(),
            ));
        }

        // Map one-step-ahead predictions back to the original scale by
        // expanding the differencing operator over past observations.
        let n = values.len();
        let mut fitted = vec![f64::NAN; n];
        let mut residuals = vec![f64::NAN; n];
        for t in (d + start)..n {
            let mut base = 0.0;
            for i in 1..=d {
                let sign = if i % 2 == 1 { 1.0 } else { -1.0 };
                base += sign * binomial(d, i) * values[t - i];
            }
            fitted[t] = fitted_diff[t - d] + base;
            residuals[t] = values[t] - fitted[t];
        }

        Ok(FittedArima {
            order: self.order,
            ar,
            ma,
            intercept,
            sigma2,
            log_likelihood,
            aic,
            bic,
            fitted,
            residuals,
            differenced,
            diff_residuals,
            series: series.clone(),
        })
    }
}

/// Estimate intercept, AR and MA coefficients on the differenced scale.
fn estimate(differenced: &[f64], p: usize, q: usize) -> Result<(f64, Vec<f64>, Vec<f64>)> {
    let mean = differenced.iter().sum::<f64>() / differenced.len() as f64;
    if p == 0 && q == 0 {
        return Ok((mean, vec![], vec![]));
    }

    let n_params = p + q + 1;
    let mut initial = vec![0.0; n_params];
    initial[0] = mean;
    for i in 0..p {
        initial[1 + i] = 0.1 / (i + 1) as f64;
    }
    for i in 0..q {
        initial[1 + p + i] = 0.1 / (i + 1) as f64;
    }

    // AR and MA coefficients are boxed inside the unit interval for
    // stationarity/invertibility; the intercept is free.
    let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
    bounds.extend(std::iter::repeat((-0.99, 0.99)).take(p + q));

    let options = SimplexOptions {
        max_iter: (300 * n_params).max(1000),
        tolerance: 1e-8,
        ..Default::default()
    };
    let outcome = minimize(
        |params| conditional_sum_of_squares(differenced, p, q, params),
        &initial,
        Some(&bounds),
        &options,
    );

    if !outcome.converged {
        return Err(ForecastError::Convergence(format!(
            "simplex search did not converge within {} iterations",
            outcome.iterations
        )));
    }
    if !outcome.value.is_finite() || outcome.point.iter().any(|x| !x.is_finite()) {
        return Err(ForecastError::Convergence(
            "optimizer produced non-finite parameters".to_string(),
        ));
    }

    let intercept = outcome.point[0];
    let ar = outcome.point[1..1 + p].to_vec();
    let ma = outcome.point[1 + p..].to_vec();
    Ok((intercept, ar, ma))
}

/// Conditional sum of squares of the ARMA recursion for the given
/// parameter vector `[intercept, ar.., ma..]`.
fn conditional_sum_of_squares(differenced: &[f64], p: usize, q: usize, params: &[f64]) -> f64 {
    let intercept = params[0];
    let ar = &params[1..1 + p];
    let ma = &params[1 + p..];
    let n = differenced.len();
    let start = p.max(q);
    if n <= start {
        return f64::MAX;
    }

    let mut residuals = vec![0.0; n];
    let mut css = 0.0;
    for t in start..n {
        let mut pred = intercept;
        for (i, phi) in ar.iter().enumerate() {
            pred += phi * (differenced[t - 1 - i] - intercept);
        }
        for (i, theta) in ma.iter().enumerate() {
            pred += theta * residuals[t - 1 - i];
        }
        let error = differenced[t] - pred;
        residuals[t] = error;
        css += error * error;
    }
    css
}

fn binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// A fitted ARIMA model: estimated parameters, fit statistics, fitted
/// values and residuals aligned to the original series.
///
/// Created by [`Arima::fit`] and immutable afterwards.
#[derive(Debug, Clone)]
pub struct FittedArima {
    order: ModelOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    sigma2: f64,
    log_likelihood: f64,
    aic: f64,
    bic: f64,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    differenced: Vec<f64>,
    diff_residuals: Vec<f64>,
    series: TimeSeries,
}

impl FittedArima {
    /// The fitted order.
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Estimated AR coefficients (length p).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Estimated MA coefficients (length q).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Estimated intercept of the differenced series.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Estimated error variance.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Conditional log-likelihood at the optimum.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike Information Criterion.
    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// Bayesian Information Criterion.
    pub fn bic(&self) -> f64 {
        self.bic
    }

    /// One-step-ahead fitted values aligned to the original series.
    /// The first `d + max(p, q)` entries are NaN.
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Residuals `actual − fitted`, NaN where fitted is undefined.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// The series the model was fitted on.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Forecast the next `horizon` periods on the original scale.
    ///
    /// The ARMA recursion is rolled forward on the differenced scale
    /// with future shocks set to zero, then integrated back using the
    /// last observed values. Timestamps continue the series cadence.
    ///
    /// # Errors
    /// - `InvalidHorizon` when `horizon` is zero
    pub fn forecast(&self, horizon: usize) -> Result<Forecast> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon);
        }

        let nd = self.differenced.len();
        let mut extended = self.differenced.clone();
        let mut shocks = self.diff_residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let mut pred = self.intercept;
            for (i, phi) in self.ar.iter().enumerate() {
                if t > i {
                    pred += phi * (extended[t - 1 - i] - self.intercept);
                }
            }
            for (i, theta) in self.ma.iter().enumerate() {
                if t > i {
                    pred += theta * shocks[t - 1 - i];
                }
            }
            extended.push(pred);
            shocks.push(0.0);
        }

        let diff_forecast = &extended[nd..];
        let predictions = if self.order.d > 0 {
            integrate(diff_forecast, self.series.values(), self.order.d)
        } else {
            diff_forecast.to_vec()
        };

        let timestamps = self.series.future_timestamps(horizon)?;
        Forecast::new(timestamps, predictions)
    }

    /// Forecast with symmetric prediction intervals at the given
    /// confidence `level`, using the residual variance with uncertainty
    /// growing linearly in the horizon.
    pub fn forecast_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence level must be in (0, 1), got {level}"
            )));
        }
        let base = self.forecast(horizon)?;
        let z = Normal::new(0.0, 1.0).unwrap().inverse_cdf((1.0 + level) / 2.0);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (step, &point) in base.values().iter().enumerate() {
            let se = (self.sigma2 * (step + 1) as f64).sqrt();
            lower.push(point - z * se);
            upper.push(point + z * se);
        }
        base.with_intervals(lower, upper)
    }
}
