//! Forecast configuration model

use fitting_spi::{ArimaOrder, SeasonalOrder};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Per-request forecasting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Forecast horizon
    pub steps: usize,
    /// Whether seasonal modeling is requested
    pub seasonal: bool,
    /// Explicit seasonal period; the use-case default applies when absent
    pub seasonal_period: Option<usize>,
    /// Interval coverage in `[0.5, 0.99)`
    pub confidence_level: f64,
    /// Manual ARIMA order
    pub order: Option<ArimaOrder>,
    /// Manual seasonal order
    pub seasonal_order: Option<SeasonalOrder>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            steps: 6,
            seasonal: true,
            seasonal_period: None,
            confidence_level: 0.95,
            order: None,
            seasonal_order: None,
        }
    }
}

impl ForecastConfig {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_seasonal(mut self, seasonal: bool) -> Self {
        self.seasonal = seasonal;
        self
    }

    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = Some(period);
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_orders(mut self, order: ArimaOrder, seasonal_order: Option<SeasonalOrder>) -> Self {
        self.order = Some(order);
        self.seasonal_order = seasonal_order;
        self
    }
}

/// Error rate for a confidence level in `[0.5, 0.99)`
pub fn confidence_alpha(confidence_level: f64) -> Result<f64> {
    if !(0.5..0.99).contains(&confidence_level) {
        return Err(ForecastError::invalid_parameter(
            "confidence_level",
            format!("must be in [0.5, 0.99), got {}", confidence_level),
        ));
    }
    Ok(1.0 - confidence_level)
}
