//! Forecasting models.

pub mod arima;

pub use arima::{select_order, Arima, FittedArima, ModelOrder, OrderSelection, SelectionConfig};
