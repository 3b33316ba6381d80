//! End-to-end orchestration: stationarity check, order selection,
//! estimation, diagnostics and forecasting in one call.

use log::debug;

use crate::core::{Forecast, TimeSeries};
use crate::diagnostics::{evaluate, DiagnosticsReport};
use crate::error::Result;
use crate::models::arima::{select_order, FittedArima, ModelOrder, SelectionConfig};
use crate::stationarity::{check_stationarity, DifferencingResult, StationarityConfig};

/// Configuration for the full pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Stationarity stage settings.
    pub stationarity: StationarityConfig,
    /// Order search bounds.
    pub selection: SelectionConfig,
}

/// Everything a caller needs to report on one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    differencing: DifferencingResult,
    scores: Vec<(ModelOrder, f64)>,
    model: FittedArima,
    diagnostics: DiagnosticsReport,
    forecast: Forecast,
}

impl PipelineOutcome {
    /// Stationarity stage output, for ADF reporting and the
    /// differenced-series plot.
    pub fn differencing(&self) -> &DifferencingResult {
        &self.differencing
    }

    /// `(order, AIC)` of every converging candidate, ascending AIC.
    pub fn scores(&self) -> &[(ModelOrder, f64)] {
        &self.scores
    }

    /// The selected fitted model.
    pub fn model(&self) -> &FittedArima {
        &self.model
    }

    /// Fit-quality metrics and residuals.
    pub fn diagnostics(&self) -> &DiagnosticsReport {
        &self.diagnostics
    }

    /// Point forecasts for the requested horizon.
    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }
}

/// Run the whole pipeline on a series.
///
/// Stages run strictly in sequence; the first failing stage aborts the
/// invocation and nothing partial is returned. The order search runs on
/// the original series with the differencing order fixed by the
/// stationarity stage, so each candidate reapplies differencing
/// internally.
pub fn run(
    series: &TimeSeries,
    horizon: usize,
    config: &PipelineConfig,
) -> Result<PipelineOutcome> {
    let differencing = check_stationarity(series, &config.stationarity)?;
    debug!("stationarity reached at d={}", differencing.d());

    let selection = select_order(series, differencing.d(), &config.selection)?;
    debug!(
        "selected order {} (AIC={:.4}, BIC={:.4})",
        selection.order(),
        selection.aic(),
        selection.bic()
    );

    let scores = selection.scores().to_vec();
    let model = selection.into_model();
    let diagnostics = evaluate(&model)?;
    let forecast = model.forecast(horizon)?;

    Ok(PipelineOutcome {
        differencing,
        scores,
        model,
        diagnostics,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    fn trending_monthly(n: usize) -> TimeSeries {
        let values: Vec<f64> = (0..n)
            .map(|i| 200.0 + 15.0 * i as f64 + 6.0 * (i as f64 * 1.7).sin())
            .collect();
        TimeSeries::monthly(2021, 1, values).unwrap()
    }

    #[test]
    fn pipeline_produces_all_stage_outputs() {
        let series = trending_monthly(36);
        let outcome = run(&series, 6, &PipelineConfig::default()).unwrap();

        assert!(outcome.differencing().d() >= 1);
        assert!(!outcome.scores().is_empty());
        assert_eq!(outcome.model().order().d, outcome.differencing().d());
        assert_eq!(outcome.forecast().horizon(), 6);
        assert!(outcome.diagnostics().rmse() >= 0.0);
    }

    #[test]
    fn pipeline_rejects_short_series() {
        let series = TimeSeries::monthly(2024, 1, vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            run(&series, 3, &PipelineConfig::default()),
            Err(ForecastError::InsufficientData { .. })
        ));
    }

    #[test]
    fn pipeline_propagates_zero_horizon() {
        let series = trending_monthly(30);
        assert!(matches!(
            run(&series, 0, &PipelineConfig::default()),
            Err(ForecastError::InvalidHorizon)
        ));
    }
}
