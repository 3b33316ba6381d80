//! Statistical helpers: moments and correlograms.

/// Mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n − 1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Autocorrelation function at lags `0..=max_lag`.
///
/// Uses the standard biased estimator: each lag shares the full-sample
/// sum of squares as denominator, so `acf[0]` is 1. Lags at or beyond
/// the series length are NaN.
pub fn autocorrelations(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    let m = mean(values);
    let denominator: f64 = values.iter().map(|x| (x - m).powi(2)).sum();

    (0..=max_lag)
        .map(|lag| {
            if lag >= n || denominator == 0.0 {
                return f64::NAN;
            }
            let numerator: f64 = (lag..n)
                .map(|t| (values[t] - m) * (values[t - lag] - m))
                .sum();
            numerator / denominator
        })
        .collect()
}

/// Partial autocorrelation function at lags `0..=max_lag` via the
/// Durbin-Levinson recursion on the sample ACF (Yule-Walker).
///
/// `pacf[0]` is 1 by convention and `pacf[1]` equals `acf[1]`.
pub fn partial_autocorrelations(values: &[f64], max_lag: usize) -> Vec<f64> {
    let acf = autocorrelations(values, max_lag);
    let mut pacf = vec![f64::NAN; max_lag + 1];
    pacf[0] = 1.0;
    if max_lag == 0 {
        return pacf;
    }
    if acf.len() < 2 || !acf[1].is_finite() {
        return pacf;
    }

    // phi holds the AR(k) coefficients of the current recursion level
    let mut phi = vec![0.0; max_lag + 1];
    let mut prev = vec![0.0; max_lag + 1];
    phi[1] = acf[1];
    pacf[1] = acf[1];
    let mut error = 1.0 - acf[1] * acf[1];

    for k in 2..=max_lag {
        if k >= acf.len() || !acf[k].is_finite() || error <= 0.0 {
            break;
        }
        prev[..k].copy_from_slice(&phi[..k]);
        let numerator = acf[k] - (1..k).map(|j| prev[j] * acf[k - j]).sum::<f64>();
        let reflection = numerator / error;
        phi[k] = reflection;
        for j in 1..k {
            phi[j] = prev[j] - reflection * prev[k - j];
        }
        error *= 1.0 - reflection * reflection;
        pacf[k] = reflection;
    }
    pacf
}
