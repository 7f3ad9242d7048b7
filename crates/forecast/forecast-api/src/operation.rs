//! Request execution against a [`ForecastService`]
//!
//! Each request type knows which operation serves it and how to shape the
//! response, so transports only deal with decoding and encoding.

use fitting_spi::FitError;
use forecast_core::ForecastService;
use forecast_spi::{ReorderContext, ReorderDecision, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::requests::{
    AutoForecastRequest, CategoryDemandRequest, EvaluationRequest, ForecastRequest,
    IngredientUsageRequest, LegacyForecastRequest, ManualForecastRequest, ReorderAlertRequest,
    RevenueRequest,
};
use crate::responses::{
    CategoryDemandResponse, ConfidenceBand, EvaluationResponse, ForecastResponse,
    IngredientUsageResponse, LegacyForecastResponse, ReorderAlertResponse, RevenueResponse,
};
use crate::wire::series_from_points;

/// A decoded request that can be served by a [`ForecastService`]
pub trait Operation: DeserializeOwned + Clone + Send + 'static {
    type Response: Serialize + Send + 'static;

    /// Name used in logs
    const NAME: &'static str;

    fn execute(self, service: &ForecastService) -> Result<Self::Response>;

    /// Response when the caller stopped waiting for the fit
    ///
    /// Fails with `cause` unless the operation has a degraded answer.
    fn on_fit_timeout(self, _service: &ForecastService, cause: FitError) -> Result<Self::Response> {
        Err(cause.into())
    }
}

fn band(lower: Vec<f64>, upper: Vec<f64>) -> ConfidenceBand {
    ConfidenceBand {
        lower,
        upper,
        level: None,
    }
}

impl Operation for AutoForecastRequest {
    type Response = ForecastResponse;
    const NAME: &'static str = "auto-forecast";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let (series, config) = ForecastRequest::from(self).into_parts()?;
        service.auto_forecast(&series, &config).map(ForecastResponse::from)
    }
}

impl Operation for ManualForecastRequest {
    type Response = ForecastResponse;
    const NAME: &'static str = "manual-forecast";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let (series, config) = self.into_parts()?;
        service.manual_forecast(&series, &config).map(ForecastResponse::from)
    }
}

impl Operation for EvaluationRequest {
    type Response = EvaluationResponse;
    const NAME: &'static str = "evaluate";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let series = series_from_points(&self.series)?;
        let result = service.evaluate(&series, self.test_size, self.seasonal, self.seasonal_period)?;
        Ok(EvaluationResponse {
            success: true,
            model: result.model.label,
            metrics: result.metrics.into(),
            predictions: result.predictions,
            actual: result.actual,
            train_size: result.train_size,
            test_size: result.test_size,
        })
    }
}

impl Operation for IngredientUsageRequest {
    type Response = IngredientUsageResponse;
    const NAME: &'static str = "ingredient-usage";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let series = series_from_points(&self.usage_history)?;
        let forecast = service.ingredient_usage(&series, &self.config())?;
        let result = forecast.result;
        Ok(IngredientUsageResponse {
            success: true,
            ingredient_id: self.ingredient_id,
            forecast_days: result.steps(),
            daily_usage_forecast: result.forecast,
            confidence_interval: band(result.lower, result.upper),
            total_forecasted_usage: forecast.summary.total,
            average_daily_usage: forecast.summary.average,
            peak_usage_day: forecast.summary.peak_index,
            model: result.model.label,
            metrics: result.metrics,
        })
    }
}

impl Operation for CategoryDemandRequest {
    type Response = CategoryDemandResponse;
    const NAME: &'static str = "category-demand";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let series = series_from_points(&self.sales_history)?;
        let config = forecast_spi::ForecastConfig::default()
            .with_steps(self.steps)
            .with_seasonal(self.seasonal);
        let forecast = service.category_demand(&series, &config)?;
        let result = forecast.result;
        Ok(CategoryDemandResponse {
            success: true,
            category_id: self.category_id,
            forecast_periods: result.steps(),
            demand_forecast: result.forecast,
            confidence_interval: band(result.lower, result.upper),
            total_forecasted_demand: forecast.summary.total,
            trend: forecast.summary.trend,
            model: result.model.label,
            metrics: result.metrics,
        })
    }
}

impl Operation for RevenueRequest {
    type Response = RevenueResponse;
    const NAME: &'static str = "revenue";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let series = series_from_points(&self.revenue_history)?;
        let config = forecast_spi::ForecastConfig::default()
            .with_steps(self.steps)
            .with_seasonal(self.seasonal);
        let forecast = service.revenue(&series, &config)?;
        let result = forecast.result;
        Ok(RevenueResponse {
            success: true,
            business_id: self.business_id,
            forecast_months: result.steps(),
            revenue_forecast: result.forecast,
            confidence_interval: band(result.lower, result.upper),
            total_forecasted_revenue: forecast.summary.total,
            average_monthly_revenue: forecast.summary.average,
            growth_rate: forecast.summary.growth_rate.unwrap_or(0.0),
            trend: forecast.summary.trend.direction,
            model: result.model.label,
            metrics: result.metrics,
        })
    }
}

impl ReorderAlertRequest {
    fn respond(self, context: ReorderContext, decision: ReorderDecision) -> ReorderAlertResponse {
        ReorderAlertResponse {
            success: true,
            ingredient_id: self.ingredient_id,
            alert_status: decision.status,
            should_reorder: decision.should_reorder,
            current_stock: context.current_stock,
            reorder_point: context.reorder_point,
            days_until_reorder: decision.days_until_reorder,
            days_until_stockout: decision.days_until_stockout,
            recommended_order_quantity: decision.recommended_order_qty,
            forecasted_usage: decision.usage,
            alert_message: decision.message,
            priority: decision.priority,
            fallback_forecast: decision.used_fallback,
        }
    }
}

impl Operation for ReorderAlertRequest {
    type Response = ReorderAlertResponse;
    const NAME: &'static str = "reorder-alert";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        let series = series_from_points(&self.usage_history)?;
        let context = self.context();
        let decision = service.reorder_alert(&series, &context)?;
        Ok(self.respond(context, decision))
    }

    /// Degrades to the historical-mean decision
    fn on_fit_timeout(self, service: &ForecastService, cause: FitError) -> Result<Self::Response> {
        let series = series_from_points(&self.usage_history)?;
        let context = self.context();
        let decision = service.reorder_alert_fallback(&series, &context, cause)?;
        Ok(self.respond(context, decision))
    }
}

impl Operation for LegacyForecastRequest {
    type Response = LegacyForecastResponse;
    const NAME: &'static str = "legacy-forecast";

    fn execute(self, service: &ForecastService) -> Result<Self::Response> {
        tracing::warn!("legacy forecast shape used; prefer /forecast/auto");
        let (series, config) = ForecastRequest::from(self).into_parts()?;
        service.auto_forecast(&series, &config).map(LegacyForecastResponse::from)
    }
}
