//! TimeSeries data structure for representing a univariate temporal series.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Months, TimeZone, Utc};

/// Spacing between consecutive observations.
///
/// Calendar months are not a fixed number of seconds, so monthly data is
/// represented as its own cadence rather than a `Duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Observations one calendar month apart.
    Monthly,
    /// Observations a fixed duration apart.
    Fixed(Duration),
}

/// A univariate time series: strictly increasing timestamps paired with
/// finite values.
///
/// The engine borrows a read-only view of the series for the duration of
/// a call; the caller keeps ownership of the data it materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a time series from timestamps and values.
    ///
    /// # Errors
    /// - `EmptyData` when no observations are supplied
    /// - `DimensionMismatch` when lengths differ
    /// - `TimestampError` when timestamps are not strictly increasing
    /// - `MissingValues` when any value is NaN or infinite
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::MissingValues);
        }
        Ok(Self { timestamps, values })
    }

    /// Create a monthly series starting at the first day of the given
    /// year and month.
    pub fn monthly(year: i32, month: u32, values: Vec<f64>) -> Result<Self> {
        let start = Utc
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| {
                ForecastError::TimestampError(format!("invalid start period {year}-{month:02}"))
            })?;
        let timestamps = (0..values.len())
            .map(|i| {
                start
                    .checked_add_months(Months::new(i as u32))
                    .ok_or_else(|| {
                        ForecastError::TimestampError("timestamp out of range".to_string())
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(timestamps, values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Observation timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Observation values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Timestamp of the last observation.
    pub fn last_timestamp(&self) -> DateTime<Utc> {
        // new() rejects empty series
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Infer the spacing between observations.
    ///
    /// Gaps of 28 to 31 days are treated as calendar months; otherwise
    /// all gaps must be identical. Mixed irregular spacing is
    /// `FrequencyInference`.
    pub fn cadence(&self) -> Result<Cadence> {
        if self.len() < 2 {
            return Err(ForecastError::FrequencyInference(
                "need at least 2 observations".to_string(),
            ));
        }
        let gaps: Vec<Duration> = self
            .timestamps
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect();

        let monthly = gaps
            .iter()
            .all(|g| *g >= Duration::days(28) && *g <= Duration::days(31));
        if monthly {
            return Ok(Cadence::Monthly);
        }
        if gaps.windows(2).all(|pair| pair[0] == pair[1]) {
            return Ok(Cadence::Fixed(gaps[0]));
        }
        Err(ForecastError::FrequencyInference(
            "irregular spacing between observations".to_string(),
        ))
    }

    /// Timestamps for the next `horizon` periods after the last
    /// observation, continuing the inferred cadence.
    pub fn future_timestamps(&self, horizon: usize) -> Result<Vec<DateTime<Utc>>> {
        let cadence = self.cadence()?;
        let last = self.last_timestamp();
        (1..=horizon)
            .map(|step| match cadence {
                Cadence::Monthly => last
                    .checked_add_months(Months::new(step as u32))
                    .ok_or_else(|| {
                        ForecastError::TimestampError("timestamp out of range".to_string())
                    }),
                Cadence::Fixed(gap) => last
                    .checked_add_signed(gap * step as i32)
                    .ok_or_else(|| {
                        ForecastError::TimestampError("timestamp out of range".to_string())
                    }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_builds_increasing_month_starts() {
        let ts = TimeSeries::monthly(2023, 11, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(ts.len(), 4);
        let stamps = ts.timestamps();
        assert_eq!(stamps[0], Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap());
        // rolls over the year boundary
        assert_eq!(stamps[2], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_empty_series() {
        assert!(matches!(
            TimeSeries::new(vec![], vec![]),
            Err(ForecastError::EmptyData)
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let stamps = vec![Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()];
        assert!(matches!(
            TimeSeries::new(stamps, vec![1.0, 2.0]),
            Err(ForecastError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn rejects_unordered_timestamps() {
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            TimeSeries::new(vec![t0, t1], vec![1.0, 2.0]),
            Err(ForecastError::TimestampError(_))
        ));
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(TimeSeries::new(vec![t, t], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!(
            TimeSeries::monthly(2024, 1, vec![1.0, f64::NAN]),
            Err(ForecastError::MissingValues)
        ));
    }

    #[test]
    fn cadence_detects_monthly() {
        let ts = TimeSeries::monthly(2024, 1, vec![1.0; 6]).unwrap();
        assert_eq!(ts.cadence().unwrap(), Cadence::Monthly);
    }

    #[test]
    fn cadence_detects_fixed_spacing() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let stamps: Vec<_> = (0..5).map(|i| base + Duration::days(i)).collect();
        let ts = TimeSeries::new(stamps, vec![0.0; 5]).unwrap();
        assert_eq!(ts.cadence().unwrap(), Cadence::Fixed(Duration::days(1)));
    }

    #[test]
    fn cadence_rejects_irregular_spacing() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let stamps = vec![
            base,
            base + Duration::days(1),
            base + Duration::days(8),
        ];
        let ts = TimeSeries::new(stamps, vec![0.0; 3]).unwrap();
        assert!(matches!(
            ts.cadence(),
            Err(ForecastError::FrequencyInference(_))
        ));
    }

    #[test]
    fn future_timestamps_continue_months() {
        let ts = TimeSeries::monthly(2024, 10, vec![1.0, 2.0, 3.0]).unwrap();
        let future = ts.future_timestamps(3).unwrap();
        assert_eq!(future.len(), 3);
        assert_eq!(future[0], Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(future[2], Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn future_timestamps_continue_fixed_gap() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let stamps: Vec<_> = (0..4).map(|i| base + Duration::weeks(i)).collect();
        let ts = TimeSeries::new(stamps, vec![0.0; 4]).unwrap();
        let future = ts.future_timestamps(2).unwrap();
        assert_eq!(future[0], base + Duration::weeks(4));
        assert_eq!(future[1], base + Duration::weeks(5));
    }
}
