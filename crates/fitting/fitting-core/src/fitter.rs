//! [`ModelFitter`] implementation backed by CSS-estimated SARIMA models

use fitting_spi::{
    ArimaOrder, AutoFitRequest, FitError, FittedModel, ModelFitter, Result, SeasonalOrder,
};

use crate::differencing::{apply_differencing, ndiffs, nsdiffs};
use crate::estimation::{Constraint, EstimationOptions, ModelSpec};
use crate::sarima::SarimaModel;
use crate::stepwise::StepwiseSearch;

/// SARIMA fitter with stepwise automatic order selection
///
/// # Example
///
/// ```rust,ignore
/// let fitter = SarimaFitter::default();
/// let request = AutoFitRequest::new(true, 12, SearchBounds::default(), 42);
/// let model = fitter.fit_auto(&sales, &request)?;
/// let bands = model.forecast(6, 0.05)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SarimaFitter {
    options: EstimationOptions,
}

impl SarimaFitter {
    pub fn new(options: EstimationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EstimationOptions {
        &self.options
    }

    /// Differencing orders chosen for a series: `(d, D)`
    pub fn select_differencing(series: &[f64], request: &AutoFitRequest) -> (usize, usize) {
        let period = if request.is_seasonal() { request.period } else { 1 };
        let seasonal_d = if period > 1 {
            nsdiffs(series, period, request.bounds.max_seasonal_d)
        } else {
            0
        };
        let adjusted = apply_differencing(series, 0, seasonal_d, period);
        let d = ndiffs(&adjusted, request.bounds.max_d);
        (d, seasonal_d)
    }
}

fn check_finite(series: &[f64]) -> Result<()> {
    if series.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(FitError::InvalidParameter {
            name: "series".to_string(),
            reason: "contains NaN or infinite values".to_string(),
        })
    }
}

impl ModelFitter for SarimaFitter {
    fn fit_auto(&self, series: &[f64], request: &AutoFitRequest) -> Result<Box<dyn FittedModel>> {
        check_finite(series)?;
        if series.len() < 2 {
            return Err(FitError::InsufficientData {
                required: 2,
                actual: series.len(),
            });
        }

        let period = if request.is_seasonal() { request.period } else { 1 };
        let (d, seasonal_d) = Self::select_differencing(series, request);
        tracing::debug!(d, seasonal_d, period, n = series.len(), "differencing selected");

        let options = EstimationOptions {
            seed: request.seed,
            ..self.options
        };
        let model =
            StepwiseSearch::new(series, d, seasonal_d, period, request.bounds, options).run()?;
        Ok(Box::new(model))
    }

    fn fit_manual(
        &self,
        series: &[f64],
        order: ArimaOrder,
        seasonal_order: SeasonalOrder,
    ) -> Result<Box<dyn FittedModel>> {
        let spec = ModelSpec::new(order, seasonal_order, false);
        let model = SarimaModel::fit(series, spec, Constraint::Relaxed, &self.options)?;
        Ok(Box::new(model))
    }
}
