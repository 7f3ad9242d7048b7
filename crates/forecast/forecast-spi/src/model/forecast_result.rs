//! Forecast result model

use fitting_spi::{ArimaOrder, SeasonalOrder};
use serde::{Deserialize, Serialize};

use super::summary::SummaryResult;

/// Which model produced a forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub order: ArimaOrder,
    pub seasonal_order: SeasonalOrder,
    /// `SARIMA(p, d, q)x(P, D, Q, m)` or `ARIMA(p, d, q)`
    pub label: String,
}

impl ModelDescriptor {
    pub fn new(order: ArimaOrder, seasonal_order: SeasonalOrder) -> Self {
        let label = if seasonal_order.is_trivial() {
            format!("ARIMA{}", order)
        } else {
            format!("SARIMA{}x{}", order, seasonal_order)
        };
        Self {
            order,
            seasonal_order,
            label,
        }
    }
}

/// Information criteria of the fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub aic: f64,
    pub bic: f64,
    pub aicc: Option<f64>,
}

/// Point forecast with interval bounds and model details
///
/// `forecast`, `lower` and `upper` have length `steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub forecast: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub model: ModelDescriptor,
    pub metrics: FitMetrics,
    /// Interval coverage the bounds were computed for
    pub confidence_level: f64,
}

impl ForecastResult {
    pub fn steps(&self) -> usize {
        self.forecast.len()
    }
}

/// Forecast plus the aggregates a business use case reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessForecast {
    pub result: ForecastResult,
    pub summary: SummaryResult,
}
