//! Numerical utilities shared by the engine components.

pub mod optimization;
pub mod stats;

pub use optimization::{minimize, SimplexOptions, SimplexOutcome};
pub use stats::{autocorrelations, mean, partial_autocorrelations, variance};
