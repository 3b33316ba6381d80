//! Error types for the arrivals-forecast library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preprocessing, fitting or forecasting a
/// series.
///
/// Every variant signals a terminal failure of the current pipeline
/// invocation; nothing is retried internally. The caller decides whether
/// to adjust the input (more data, wider search bounds) and start over.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient observations for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Series still fails the unit-root test at the differencing cap.
    #[error("series remains non-stationary after {max_d} differencing passes")]
    NonStationary { max_d: usize },

    /// No candidate order produced a converged fit.
    #[error("no ARIMA candidate converged (max_p={max_p}, max_q={max_q})")]
    ModelSelection { max_p: usize, max_q: usize },

    /// Parameter estimation diverged or produced non-finite values.
    #[error("estimation failed to converge: {0}")]
    Convergence(String),

    /// Forecast horizon must be at least one period.
    #[error("forecast horizon must be positive")]
    InvalidHorizon,

    /// A metric denominator was zero for every usable observation.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Input series is constant; unit-root regression is undefined.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Missing or non-finite values detected in the input.
    #[error("missing or non-finite values detected in data")]
    MissingValues,

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Cadence inference failed.
    #[error("could not infer cadence: {0}")]
    FrequencyInference(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error.
    #[error("computation error: {0}")]
    Computation(String),
}
