//! Request shapes for the forecasting operations
//!
//! Defaults mirror the use-case profiles. [`ForecastRequest`] is the tagged
//! union of the canonical and legacy forecast shapes; both map onto a
//! [`ForecastConfig`].

use fitting_spi::{ArimaOrder, SeasonalOrder};
use forecast_core::service::DEFAULT_MANUAL_ORDER;
use forecast_core::UseCase;
use forecast_spi::{ForecastConfig, ReorderContext, Result, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::wire::{series_from_points, DataPoint};

fn default_true() -> bool {
    true
}

fn default_confidence() -> f64 {
    ForecastConfig::default().confidence_level
}

fn default_order() -> ArimaOrder {
    DEFAULT_MANUAL_ORDER
}

fn default_auto_steps() -> usize {
    UseCase::AutoForecast.profile().default_steps
}

fn default_manual_steps() -> usize {
    UseCase::ManualForecast.profile().default_steps
}

fn default_test_size() -> usize {
    UseCase::Evaluate.profile().default_steps
}

fn default_ingredient_steps() -> usize {
    UseCase::IngredientUsage.profile().default_steps
}

fn default_ingredient_period() -> usize {
    UseCase::IngredientUsage.profile().default_period
}

fn default_category_steps() -> usize {
    UseCase::CategoryDemand.profile().default_steps
}

fn default_revenue_steps() -> usize {
    UseCase::Revenue.profile().default_steps
}

fn default_lead_time() -> usize {
    3
}

fn default_legacy_period() -> usize {
    UseCase::AutoForecast.profile().default_period
}

/// Automatic forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoForecastRequest {
    pub series: Vec<DataPoint>,
    #[serde(default = "default_auto_steps")]
    pub steps: usize,
    #[serde(default = "default_true")]
    pub seasonal: bool,
    #[serde(default)]
    pub seasonal_period: Option<usize>,
    #[serde(default = "default_confidence")]
    pub confidence_level: f64,
}

/// Manual forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualForecastRequest {
    pub series: Vec<DataPoint>,
    #[serde(default = "default_manual_steps")]
    pub steps: usize,
    #[serde(default = "default_order")]
    pub order: ArimaOrder,
    #[serde(default)]
    pub seasonal_order: Option<SeasonalOrder>,
    #[serde(default = "default_confidence")]
    pub confidence_level: f64,
}

impl ManualForecastRequest {
    pub fn into_parts(self) -> Result<(TimeSeries, ForecastConfig)> {
        let series = series_from_points(&self.series)?;
        let config = ForecastConfig::default()
            .with_steps(self.steps)
            .with_confidence_level(self.confidence_level)
            .with_orders(self.order, self.seasonal_order);
        Ok((series, config))
    }
}

/// Backtest request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub series: Vec<DataPoint>,
    #[serde(default = "default_test_size")]
    pub test_size: usize,
    #[serde(default = "default_true")]
    pub seasonal: bool,
    #[serde(default)]
    pub seasonal_period: Option<usize>,
}

/// Ingredient usage forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsageRequest {
    pub ingredient_id: String,
    pub usage_history: Vec<DataPoint>,
    #[serde(default = "default_ingredient_steps")]
    pub steps: usize,
    #[serde(default = "default_true")]
    pub seasonal: bool,
    #[serde(default = "default_ingredient_period")]
    pub seasonal_period: usize,
}

impl IngredientUsageRequest {
    pub fn config(&self) -> ForecastConfig {
        ForecastConfig::default()
            .with_steps(self.steps)
            .with_seasonal(self.seasonal)
            .with_seasonal_period(self.seasonal_period)
    }
}

/// Category demand forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDemandRequest {
    pub category_id: String,
    pub sales_history: Vec<DataPoint>,
    #[serde(default = "default_category_steps")]
    pub steps: usize,
    #[serde(default = "default_true")]
    pub seasonal: bool,
}

/// Revenue forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRequest {
    pub business_id: String,
    pub revenue_history: Vec<DataPoint>,
    #[serde(default = "default_revenue_steps")]
    pub steps: usize,
    #[serde(default = "default_true")]
    pub seasonal: bool,
}

/// Reorder alert request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderAlertRequest {
    pub ingredient_id: String,
    pub current_stock: f64,
    pub usage_history: Vec<DataPoint>,
    pub reorder_point: f64,
    #[serde(default = "default_lead_time")]
    pub lead_time_days: usize,
    #[serde(default)]
    pub safety_stock: f64,
}

impl ReorderAlertRequest {
    pub fn context(&self) -> ReorderContext {
        ReorderContext::new(
            self.current_stock,
            self.reorder_point,
            self.lead_time_days,
            self.safety_stock,
        )
    }
}

/// Shape accepted by the legacy `/forecast` route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyForecastRequest {
    pub series: Vec<DataPoint>,
    #[serde(default = "default_auto_steps")]
    pub steps: usize,
    #[serde(default = "default_true")]
    pub seasonal: bool,
    #[serde(default = "default_legacy_period")]
    pub seasonal_period: usize,
}

/// Forecast request in either the canonical or the legacy shape
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastRequest {
    Canonical(AutoForecastRequest),
    Legacy(LegacyForecastRequest),
}

impl From<AutoForecastRequest> for ForecastRequest {
    fn from(request: AutoForecastRequest) -> Self {
        ForecastRequest::Canonical(request)
    }
}

impl From<LegacyForecastRequest> for ForecastRequest {
    fn from(request: LegacyForecastRequest) -> Self {
        ForecastRequest::Legacy(request)
    }
}

impl ForecastRequest {
    /// Parse the series and map either shape onto a [`ForecastConfig`]
    ///
    /// Legacy requests always carry a period (default 12) and use the default
    /// confidence level.
    pub fn into_parts(self) -> Result<(TimeSeries, ForecastConfig)> {
        match self {
            ForecastRequest::Canonical(request) => {
                let mut config = ForecastConfig::default()
                    .with_steps(request.steps)
                    .with_seasonal(request.seasonal)
                    .with_confidence_level(request.confidence_level);
                config.seasonal_period = request.seasonal_period;
                Ok((series_from_points(&request.series)?, config))
            }
            ForecastRequest::Legacy(request) => {
                let config = ForecastConfig::default()
                    .with_steps(request.steps)
                    .with_seasonal(request.seasonal)
                    .with_seasonal_period(request.seasonal_period);
                Ok((series_from_points(&request.series)?, config))
            }
        }
    }
}
