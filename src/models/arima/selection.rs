//! AIC-based ARIMA order selection.

use log::debug;

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::arima::model::{Arima, FittedArima, ModelOrder};
use crate::stationarity::MIN_OBSERVATIONS;

/// Search bounds for the order sweep.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Maximum AR order to consider.
    pub max_p: usize,
    /// Maximum MA order to consider.
    pub max_q: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { max_p: 5, max_q: 5 }
    }
}

/// Result of the order search: the winning fitted model and the score
/// table of every converging candidate.
#[derive(Debug, Clone)]
pub struct OrderSelection {
    model: FittedArima,
    scores: Vec<(ModelOrder, f64)>,
}

impl OrderSelection {
    /// The winning order.
    pub fn order(&self) -> ModelOrder {
        self.model.order()
    }

    /// AIC of the winning fit.
    pub fn aic(&self) -> f64 {
        self.model.aic()
    }

    /// BIC of the winning fit.
    pub fn bic(&self) -> f64 {
        self.model.bic()
    }

    /// The winning fitted model.
    pub fn model(&self) -> &FittedArima {
        &self.model
    }

    /// Consume the selection, keeping the fitted model.
    pub fn into_model(self) -> FittedArima {
        self.model
    }

    /// `(order, AIC)` for every candidate that converged, sorted by
    /// ascending AIC.
    pub fn scores(&self) -> &[(ModelOrder, f64)] {
        &self.scores
    }
}

/// Exhaustively search p ∈ [0, max_p], q ∈ [0, max_q] at the fixed
/// differencing order `d`, scoring converged candidates by AIC.
///
/// Ties on AIC prefer fewer parameters, then lower BIC; the sweep order
/// is fixed, so the result is deterministic. Candidates whose
/// estimation fails are skipped, never compared.
///
/// # Errors
/// - `InsufficientData` when the series is shorter than the engine
///   minimum
/// - `ModelSelection` when no candidate converges
pub fn select_order(
    series: &TimeSeries,
    d: usize,
    config: &SelectionConfig,
) -> Result<OrderSelection> {
    if series.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            needed: MIN_OBSERVATIONS,
            got: series.len(),
        });
    }

    let mut best: Option<FittedArima> = None;
    let mut scores = Vec::new();

    for p in 0..=config.max_p {
        for q in 0..=config.max_q {
            let order = ModelOrder::new(p, d, q);
            let candidate = match Arima::with_order(order).fit(series) {
                Ok(fit) => fit,
                Err(err) => {
                    debug!("order {} skipped: {}", order, err);
                    continue;
                }
            };
            if !candidate.aic().is_finite() {
                debug!("order {} skipped: non-finite AIC", order);
                continue;
            }
            debug!("order {}: AIC={:.4}", order, candidate.aic());
            scores.push((order, candidate.aic()));

            let improves = match &best {
                None => true,
                Some(incumbent) => beats(&candidate, incumbent),
            };
            if improves {
                best = Some(candidate);
            }
        }
    }

    scores.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some(model) => Ok(OrderSelection { model, scores }),
        None => Err(ForecastError::ModelSelection {
            max_p: config.max_p,
            max_q: config.max_q,
        }),
    }
}

/// Strict-improvement comparison: lower AIC wins; on an exact AIC tie,
/// fewer parameters win, then lower BIC.
fn beats(challenger: &FittedArima, incumbent: &FittedArima) -> bool {
    if challenger.aic() != incumbent.aic() {
        return challenger.aic() < incumbent.aic();
    }
    let challenger_params = challenger.order().num_params();
    let incumbent_params = incumbent.order().num_params();
    if challenger_params != incumbent_params {
        return challenger_params < incumbent_params;
    }
    challenger.bic() < incumbent.bic()
}
