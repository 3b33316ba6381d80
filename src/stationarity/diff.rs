//! Differencing and integration of series values.

/// Difference a series `d` times.
///
/// Each pass replaces the series with consecutive changes
/// `value[t] − value[t−1]`, shortening it by one.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|pair| pair[1] - pair[0]).collect();
    }
    result
}

/// Undo `d`-fold differencing for values continuing past the end of
/// `original`.
///
/// Each integration level is a cumulative sum reseeded from the last
/// value of the original series differenced to that level.
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || differenced.is_empty() {
        return differenced.to_vec();
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let seed = *difference(original, level).last().unwrap_or(&0.0);
        let mut running = seed;
        for value in &mut result {
            running += *value;
            *value = running;
        }
    }
    result
}
