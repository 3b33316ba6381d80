//! ARIMA model: estimation, order selection and forecasting.
//!
//! This module provides:
//! - [`Arima`] / [`FittedArima`] for fitting a chosen (p, d, q) order
//! - [`select_order`] for the exhaustive AIC sweep over candidate orders

mod model;
mod selection;

pub use model::{Arima, FittedArima, ModelOrder};
pub use selection::{select_order, OrderSelection, SelectionConfig};
