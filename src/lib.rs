//! # arrivals-forecast
//!
//! ARIMA forecasting engine for monthly arrival counts.
//!
//! The crate covers the statistical core of a tourist-arrivals
//! forecasting application: ADF stationarity testing with conditional
//! differencing, exhaustive AIC order selection, conditional
//! maximum-likelihood estimation, residual diagnostics and multi-step
//! forecasting reconstructed onto the original scale. Persistence and
//! presentation stay with the caller; the engine takes a materialized
//! [`core::TimeSeries`] and hands back plain data structures.
//!
//! ```no_run
//! use arrivals_forecast::core::TimeSeries;
//! use arrivals_forecast::pipeline::{run, PipelineConfig};
//!
//! # fn main() -> arrivals_forecast::Result<()> {
//! let arrivals = TimeSeries::monthly(2022, 1, vec![
//!     210.0, 225.0, 248.0, 262.0, 281.0, 304.0, 320.0, 339.0,
//!     361.0, 378.0, 402.0, 419.0, 441.0, 459.0, 482.0, 501.0,
//!     523.0, 540.0, 564.0, 581.0, 604.0, 622.0, 645.0, 660.0,
//! ])?;
//!
//! let outcome = run(&arrivals, 3, &PipelineConfig::default())?;
//! println!(
//!     "order {}: AIC {:.2}, RMSE {:.2}",
//!     outcome.model().order(),
//!     outcome.model().aic(),
//!     outcome.diagnostics().rmse(),
//! );
//! for (timestamp, value) in outcome.forecast().points() {
//!     println!("{timestamp}: {value:.0}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod stationarity;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Cadence, Forecast, TimeSeries};
    pub use crate::diagnostics::{evaluate, DiagnosticsReport};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::arima::{
        select_order, Arima, FittedArima, ModelOrder, OrderSelection, SelectionConfig,
    };
    pub use crate::pipeline::{run, PipelineConfig, PipelineOutcome};
    pub use crate::stationarity::{
        adf_test, check_stationarity, AdfOutcome, DifferencingResult, StationarityConfig,
    };
}
