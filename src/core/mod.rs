//! Core data structures shared across the engine.

mod forecast;
mod time_series;

pub use forecast::Forecast;
pub use time_series::{Cadence, TimeSeries};
