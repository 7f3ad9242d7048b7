//! Fitted model contract

use crate::error::Result;
use crate::model::{ArimaOrder, ForecastBands, SeasonalOrder};

/// A fitted ARIMA/SARIMA model
///
/// Produced by a [`ModelFitter`](crate::ModelFitter) and used transiently by
/// the forecasting core: it is asked for a forecast and its information
/// criteria, then dropped.
pub trait FittedModel: Send + Sync {
    /// Non-seasonal order of the fitted model
    fn order(&self) -> ArimaOrder;

    /// Seasonal order of the fitted model (`(0, 0, 0, 0)` when non-seasonal)
    fn seasonal_order(&self) -> SeasonalOrder;

    /// Forecast `steps` periods ahead
    ///
    /// # Arguments
    ///
    /// * `steps` - Forecast horizon
    /// * `alpha` - Error rate of the prediction interval (0.05 gives a 95% interval)
    fn forecast(&self, steps: usize, alpha: f64) -> Result<ForecastBands>;

    /// Akaike information criterion
    fn aic(&self) -> f64;

    /// Bayesian information criterion
    fn bic(&self) -> f64;

    /// Small-sample corrected AIC, when defined for the sample size
    fn aicc(&self) -> Option<f64>;
}
