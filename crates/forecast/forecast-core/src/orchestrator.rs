//! Forecast orchestration
//!
//! Turns a resolved forecasting plan into a fitted model and a
//! [`ForecastResult`]. All numerical work is delegated to the [`ModelFitter`].

use std::sync::Arc;

use fitting_spi::{ArimaOrder, AutoFitRequest, ModelFitter, SearchBounds, SeasonalOrder};
use forecast_spi::{
    confidence_alpha, FitMetrics, ForecastError, ForecastResult, ModelDescriptor, Result,
    TimeSeries,
};

/// Seed of the automatic order search
pub const DEFAULT_SEED: u64 = 42;

/// How the model orders are obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitMode {
    /// Stepwise search within the bounds
    Automatic(SearchBounds),
    /// Exact orders with relaxed coefficient constraints
    Manual {
        order: ArimaOrder,
        seasonal_order: SeasonalOrder,
    },
}

/// Everything the orchestrator needs besides the series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPlan {
    pub seasonal: bool,
    pub period: usize,
    pub steps: usize,
    pub confidence_level: f64,
    pub mode: FitMode,
}

impl ForecastPlan {
    pub fn automatic(
        seasonal: bool,
        period: usize,
        steps: usize,
        confidence_level: f64,
        bounds: SearchBounds,
    ) -> Self {
        Self {
            seasonal,
            period,
            steps,
            confidence_level,
            mode: FitMode::Automatic(bounds),
        }
    }

    pub fn manual(
        order: ArimaOrder,
        seasonal_order: SeasonalOrder,
        steps: usize,
        confidence_level: f64,
    ) -> Self {
        Self {
            seasonal: !seasonal_order.is_trivial(),
            period: seasonal_order.m.max(1),
            steps,
            confidence_level,
            mode: FitMode::Manual {
                order,
                seasonal_order,
            },
        }
    }
}

/// Runs fits through a [`ModelFitter`] and post-processes the output
#[derive(Clone)]
pub struct ForecastOrchestrator {
    fitter: Arc<dyn ModelFitter>,
    seed: u64,
}

impl std::fmt::Debug for ForecastOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastOrchestrator")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl ForecastOrchestrator {
    pub fn new(fitter: Arc<dyn ModelFitter>) -> Self {
        Self {
            fitter,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn fitter(&self) -> &Arc<dyn ModelFitter> {
        &self.fitter
    }

    /// Fit and forecast `plan.steps` periods ahead
    pub fn run(&self, series: &TimeSeries, plan: &ForecastPlan) -> Result<ForecastResult> {
        let alpha = confidence_alpha(plan.confidence_level)?;
        if plan.steps == 0 {
            return Err(ForecastError::invalid_parameter("steps", "must be at least 1"));
        }
        let values = series.values();

        let (model, descriptor) = match plan.mode {
            FitMode::Automatic(bounds) => {
                let request = AutoFitRequest::new(plan.seasonal, plan.period, bounds, self.seed);
                let model = self.fitter.fit_auto(values, &request)?;
                let seasonal_order = if plan.seasonal {
                    model.seasonal_order()
                } else {
                    SeasonalOrder::none()
                };
                let descriptor = ModelDescriptor::new(model.order(), seasonal_order);
                (model, descriptor)
            }
            FitMode::Manual {
                order,
                seasonal_order,
            } => {
                let model = self.fitter.fit_manual(values, order, seasonal_order)?;
                (model, ModelDescriptor::new(order, seasonal_order))
            }
        };

        let bands = model.forecast(plan.steps, alpha)?;
        tracing::debug!(
            model = %descriptor.label,
            steps = plan.steps,
            aic = model.aic(),
            "forecast produced"
        );

        Ok(ForecastResult {
            forecast: bands.mean,
            lower: bands.lower,
            upper: bands.upper,
            model: descriptor,
            metrics: FitMetrics {
                aic: model.aic(),
                bic: model.bic(),
                aicc: model.aicc(),
            },
            confidence_level: plan.confidence_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingFitter, FlatFitter};

    fn series(n: usize) -> TimeSeries {
        TimeSeries::from_values((0..n).map(|i| 10.0 + i as f64).collect())
    }

    #[test]
    fn test_automatic_run() {
        let orchestrator = ForecastOrchestrator::new(Arc::new(FlatFitter::new(5.0)));
        let plan = ForecastPlan::automatic(true, 12, 4, 0.95, SearchBounds::default());
        let result = orchestrator.run(&series(30), &plan).unwrap();

        assert_eq!(result.forecast, vec![5.0; 4]);
        assert_eq!(result.lower.len(), 4);
        assert_eq!(result.model.label, "SARIMA(1, 1, 1)x(1, 1, 1, 12)");
        assert_eq!(result.confidence_level, 0.95);
    }

    #[test]
    fn test_non_seasonal_plan_reports_arima() {
        let orchestrator = ForecastOrchestrator::new(Arc::new(FlatFitter::new(5.0)));
        let plan = ForecastPlan::automatic(false, 1, 2, 0.9, SearchBounds::default());
        let result = orchestrator.run(&series(30), &plan).unwrap();

        assert_eq!(result.model.label, "ARIMA(1, 1, 1)");
        assert_eq!(result.model.seasonal_order, SeasonalOrder::none());
    }

    #[test]
    fn test_alpha_passed_to_model() {
        let orchestrator = ForecastOrchestrator::new(Arc::new(FlatFitter::new(0.0)));
        let plan = ForecastPlan::automatic(false, 1, 1, 0.8, SearchBounds::default());
        let result = orchestrator.run(&series(10), &plan).unwrap();
        // FlatFitter widens its bands by alpha
        assert!((result.upper[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_manual_run_keeps_orders() {
        let orchestrator = ForecastOrchestrator::new(Arc::new(FlatFitter::new(1.0)));
        let plan = ForecastPlan::manual(ArimaOrder::new(2, 0, 1), SeasonalOrder::none(), 3, 0.95);
        let result = orchestrator.run(&series(10), &plan).unwrap();
        assert_eq!(result.model.label, "ARIMA(2, 0, 1)");
        assert!(!plan.seasonal);
    }

    #[test]
    fn test_invalid_confidence() {
        let orchestrator = ForecastOrchestrator::new(Arc::new(FlatFitter::new(1.0)));
        let plan = ForecastPlan::automatic(false, 1, 3, 0.995, SearchBounds::default());
        let err = orchestrator.run(&series(10), &plan).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_fitting_error_surfaces() {
        let orchestrator = ForecastOrchestrator::new(Arc::new(FailingFitter));
        let plan = ForecastPlan::automatic(false, 1, 3, 0.95, SearchBounds::default());
        let err = orchestrator.run(&series(10), &plan).unwrap_err();
        assert!(matches!(err, ForecastError::Fitting(_)));
    }
}
