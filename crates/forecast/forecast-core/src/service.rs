//! Forecasting operations, one per use case
//!
//! Every operation validates its input, resolves seasonality from the use-case
//! profile, runs the orchestrator and post-processes the result.

use std::sync::Arc;

use fitting_spi::{ArimaOrder, FitError, ModelFitter, SeasonalOrder};
use forecast_spi::{
    BusinessForecast, EvaluationResult, ForecastConfig, ForecastResult, ReorderContext,
    ReorderDecision, Result, TimeSeries,
};

use crate::evaluation::EvaluationHarness;
use crate::orchestrator::{ForecastOrchestrator, ForecastPlan};
use crate::profile::{UseCase, REORDER_HORIZON};
use crate::reorder::{usage_forecast_or_mean, ReorderDecisionEngine};
use crate::seasonality::SeasonalityResolver;
use crate::summary::{ResultSummarizer, TrendVocabulary};
use crate::validation::SeriesValidator;

/// Confidence level of the reorder usage forecast
const REORDER_CONFIDENCE: f64 = 0.95;

/// Default manual order
pub const DEFAULT_MANUAL_ORDER: ArimaOrder = ArimaOrder::new(1, 1, 1);

/// Entry point for the seven forecasting operations
///
/// Stateless apart from the fitter handle; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ForecastService {
    orchestrator: ForecastOrchestrator,
}

impl ForecastService {
    pub fn new(fitter: Arc<dyn ModelFitter>) -> Self {
        Self {
            orchestrator: ForecastOrchestrator::new(fitter),
        }
    }

    /// Use a different seed for the automatic order search
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.orchestrator = self.orchestrator.with_seed(seed);
        self
    }

    pub fn orchestrator(&self) -> &ForecastOrchestrator {
        &self.orchestrator
    }

    /// Automatic forecast with the profile's search bounds
    fn automatic(
        &self,
        use_case: UseCase,
        series: &TimeSeries,
        config: &ForecastConfig,
    ) -> Result<ForecastResult> {
        let profile = use_case.profile();
        let steps = profile.check_steps(config.steps)?;
        SeriesValidator::new(profile.validation).validate(series)?;

        let (seasonal, period) = SeasonalityResolver::new(profile.default_period).resolve(
            series.len(),
            config.seasonal,
            config.seasonal_period,
        );
        let plan = ForecastPlan::automatic(
            seasonal,
            period,
            steps,
            config.confidence_level,
            profile.bounds,
        );
        let result = self.orchestrator.run(series, &plan)?;
        tracing::info!(
            operation = use_case.name(),
            observations = series.len(),
            model = %result.model.label,
            "forecast served"
        );
        Ok(result)
    }

    /// Stepwise-selected SARIMA/ARIMA forecast
    pub fn auto_forecast(&self, series: &TimeSeries, config: &ForecastConfig) -> Result<ForecastResult> {
        self.automatic(UseCase::AutoForecast, series, config)
    }

    /// Forecast with caller-supplied orders; defaults to ARIMA(1, 1, 1)
    pub fn manual_forecast(&self, series: &TimeSeries, config: &ForecastConfig) -> Result<ForecastResult> {
        let profile = UseCase::ManualForecast.profile();
        let steps = profile.check_steps(config.steps)?;
        SeriesValidator::new(profile.validation).validate(series)?;

        let order = config.order.unwrap_or(DEFAULT_MANUAL_ORDER);
        let seasonal_order = config.seasonal_order.unwrap_or_else(SeasonalOrder::none);
        let plan = ForecastPlan::manual(order, seasonal_order, steps, config.confidence_level);
        let result = self.orchestrator.run(series, &plan)?;
        tracing::info!(
            operation = UseCase::ManualForecast.name(),
            observations = series.len(),
            model = %result.model.label,
            "forecast served"
        );
        Ok(result)
    }

    /// Backtest on the last `test_size` observations
    pub fn evaluate(
        &self,
        series: &TimeSeries,
        test_size: usize,
        seasonal: bool,
        seasonal_period: Option<usize>,
    ) -> Result<EvaluationResult> {
        let result = EvaluationHarness::new(self.orchestrator.clone()).evaluate(
            series,
            test_size,
            seasonal,
            seasonal_period,
        )?;
        tracing::info!(
            operation = UseCase::Evaluate.name(),
            train_size = result.train_size,
            mae = result.metrics.mae,
            "evaluation served"
        );
        Ok(result)
    }

    /// Daily ingredient usage with total, average and peak day
    pub fn ingredient_usage(&self, series: &TimeSeries, config: &ForecastConfig) -> Result<BusinessForecast> {
        let result = self.automatic(UseCase::IngredientUsage, series, config)?;
        let summary = ResultSummarizer::summarize(&result.forecast, TrendVocabulary::Demand);
        Ok(BusinessForecast { result, summary })
    }

    /// Category demand with total and growing/declining trend
    ///
    /// The seasonal period is fixed at 7; any period in `config` is ignored.
    pub fn category_demand(&self, series: &TimeSeries, config: &ForecastConfig) -> Result<BusinessForecast> {
        let config = ForecastConfig {
            seasonal_period: None,
            ..config.clone()
        };
        let result = self.automatic(UseCase::CategoryDemand, series, &config)?;
        let summary = ResultSummarizer::summarize(&result.forecast, TrendVocabulary::Demand);
        Ok(BusinessForecast { result, summary })
    }

    /// Revenue with total, average, growth rate and increasing/decreasing trend
    ///
    /// The seasonal period is fixed at 12; any period in `config` is ignored.
    pub fn revenue(&self, series: &TimeSeries, config: &ForecastConfig) -> Result<BusinessForecast> {
        let config = ForecastConfig {
            seasonal_period: None,
            ..config.clone()
        };
        let result = self.automatic(UseCase::Revenue, series, &config)?;
        let summary = ResultSummarizer::summarize_with_growth(
            &result.forecast,
            series.values(),
            TrendVocabulary::Revenue,
        );
        Ok(BusinessForecast { result, summary })
    }

    /// Reorder decision from a 30-day usage forecast
    ///
    /// A fitting failure degrades to the historical mean usage instead of
    /// failing the request.
    pub fn reorder_alert(&self, series: &TimeSeries, context: &ReorderContext) -> Result<ReorderDecision> {
        context.validate()?;
        let config = ForecastConfig::default()
            .with_steps(REORDER_HORIZON)
            .with_confidence_level(REORDER_CONFIDENCE);

        let outcome = self.automatic(UseCase::ReorderAlert, series, &config);
        // Input errors never reach the fallback
        let outcome = match outcome {
            Err(e) if e.is_input_error() => return Err(e),
            other => other,
        };
        self.decide_reorder(series, context, outcome)
    }

    /// Reorder decision when the usage fit failed outside this service
    ///
    /// Used when a caller gave up on [`reorder_alert`](Self::reorder_alert),
    /// e.g. after a deadline. Input is validated as usual, then usage is the
    /// historical mean.
    pub fn reorder_alert_fallback(
        &self,
        series: &TimeSeries,
        context: &ReorderContext,
        cause: FitError,
    ) -> Result<ReorderDecision> {
        context.validate()?;
        SeriesValidator::new(UseCase::ReorderAlert.profile().validation).validate(series)?;
        self.decide_reorder(series, context, Err(cause.into()))
    }

    fn decide_reorder(
        &self,
        series: &TimeSeries,
        context: &ReorderContext,
        outcome: Result<ForecastResult>,
    ) -> Result<ReorderDecision> {
        let (usage, used_fallback) = usage_forecast_or_mean(outcome, series)?;

        let decision = ReorderDecisionEngine::decide(context, &usage, used_fallback);
        tracing::info!(
            operation = UseCase::ReorderAlert.name(),
            status = ?decision.status,
            days_until_reorder = decision.days_until_reorder,
            used_fallback,
            "reorder alert served"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingFitter, FlatFitter};
    use forecast_spi::{AlertStatus, ForecastError, TrendDirection};

    fn series(values: &[f64]) -> TimeSeries {
        TimeSeries::from_values(values.to_vec())
    }

    fn ramp(n: usize) -> TimeSeries {
        TimeSeries::from_values((0..n).map(|i| 10.0 + i as f64).collect())
    }

    #[test]
    fn test_auto_forecast_defaults() {
        let fitter = Arc::new(FlatFitter::new(50.0));
        let service = ForecastService::new(fitter.clone());
        let result = service.auto_forecast(&ramp(30), &ForecastConfig::default()).unwrap();

        assert_eq!(result.steps(), 6);
        let (_, request) = fitter.last_request().unwrap();
        assert_eq!(request.period, 12);
        assert_eq!(request.seed, 42);
        assert_eq!(request.bounds.max_p, 5);
    }

    #[test]
    fn test_seed_is_configurable() {
        let fitter = Arc::new(FlatFitter::new(50.0));
        let service = ForecastService::new(fitter.clone()).with_seed(7);
        service.auto_forecast(&ramp(30), &ForecastConfig::default()).unwrap();
        assert_eq!(fitter.last_request().unwrap().1.seed, 7);
    }

    #[test]
    fn test_auto_forecast_rejects_nan() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(1.0)));
        let err = service
            .auto_forecast(&series(&[1.0, f64::NAN, 3.0, 4.0]), &ForecastConfig::default())
            .unwrap_err();
        assert_eq!(err.code(), "CONTAINS_NULL");
    }

    #[test]
    fn test_manual_forecast_default_order() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(1.0)));
        let result = service.manual_forecast(&ramp(10), &ForecastConfig::default()).unwrap();
        assert_eq!(result.model.label, "ARIMA(1, 1, 1)");
    }

    #[test]
    fn test_manual_forecast_seasonal_label() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(1.0)));
        let config = ForecastConfig::default()
            .with_orders(ArimaOrder::new(1, 1, 1), Some(SeasonalOrder::new(1, 1, 1, 12)));
        let result = service.manual_forecast(&ramp(40), &config).unwrap();
        assert_eq!(result.model.label, "SARIMA(1, 1, 1)x(1, 1, 1, 12)");
    }

    #[test]
    fn test_ingredient_usage_summary() {
        let fitter = Arc::new(FlatFitter::new(4.0));
        let service = ForecastService::new(fitter.clone());
        let config = ForecastConfig::default().with_steps(7);
        let forecast = service.ingredient_usage(&ramp(21), &config).unwrap();

        assert_eq!(forecast.summary.total, 28.0);
        assert_eq!(forecast.summary.average, 4.0);
        assert_eq!(forecast.summary.peak_index, Some(1));
        let (_, request) = fitter.last_request().unwrap();
        assert_eq!(request.period, 7);
        assert_eq!(request.bounds.max_p, 3);
    }

    #[test]
    fn test_ingredient_steps_limit() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(4.0)));
        let config = ForecastConfig::default().with_steps(91);
        assert!(matches!(
            service.ingredient_usage(&ramp(21), &config),
            Err(ForecastError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_category_demand_validation() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(4.0)));
        let config = ForecastConfig::default().with_steps(30);

        let err = service.category_demand(&ramp(5), &config).unwrap_err();
        assert_eq!(err.code(), "TOO_SHORT");
        let err = service.category_demand(&series(&[3.0; 10]), &config).unwrap_err();
        assert_eq!(err.code(), "ZERO_VARIANCE");
        let err = service
            .category_demand(&series(&[3.0, -1.0, 4.0, 5.0, 6.0, 7.0, 8.0]), &config)
            .unwrap_err();
        assert_eq!(err.code(), "CONTAINS_NEGATIVE");
    }

    #[test]
    fn test_category_demand_trend() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(4.0)));
        let forecast = service
            .category_demand(&ramp(14), &ForecastConfig::default().with_steps(30))
            .unwrap();
        assert_eq!(forecast.summary.total, 120.0);
        assert_eq!(forecast.summary.trend.direction, TrendDirection::Declining);
    }

    #[test]
    fn test_revenue_growth() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(110.0)));
        let history = series(&[80.0, 90.0, 100.0, 100.0, 100.0]);
        let forecast = service.revenue(&history, &ForecastConfig::default()).unwrap();
        assert!((forecast.summary.growth_rate.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(forecast.summary.trend.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_revenue_steps_limit() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(110.0)));
        let config = ForecastConfig::default().with_steps(13);
        assert!(service.revenue(&ramp(24), &config).is_err());
    }

    #[test]
    fn test_reorder_alert_critical() {
        let service = ForecastService::new(Arc::new(FlatFitter::new(25.0)));
        let decision = service
            .reorder_alert(&ramp(20), &ReorderContext::new(50.0, 100.0, 3, 0.0))
            .unwrap();
        assert_eq!(decision.status, AlertStatus::Critical);
        assert!(!decision.used_fallback);
    }

    #[test]
    fn test_reorder_alert_falls_back_on_fitting_failure() {
        let service = ForecastService::new(Arc::new(FailingFitter));
        let history = series(&[20.0, 30.0, 25.0, 25.0]);
        let decision = service
            .reorder_alert(&history, &ReorderContext::new(500.0, 100.0, 3, 0.0))
            .unwrap();

        assert!(decision.used_fallback);
        assert_eq!(decision.days_until_reorder, 16);
        assert_eq!(decision.status, AlertStatus::Ok);
        assert_eq!(decision.usage.next_30_days, 750.0);
    }

    #[test]
    fn test_reorder_alert_input_errors_are_not_masked() {
        let service = ForecastService::new(Arc::new(FailingFitter));
        let err = service
            .reorder_alert(&series(&[5.0]), &ReorderContext::new(500.0, 100.0, 3, 0.0))
            .unwrap_err();
        assert_eq!(err.code(), "TOO_SHORT");
    }

    #[test]
    fn test_reorder_alert_fallback_after_deadline() {
        // The fitter would succeed; the fallback never consults it
        let service = ForecastService::new(Arc::new(FlatFitter::new(1_000.0)));
        let history = series(&[20.0, 30.0, 25.0, 25.0]);
        let decision = service
            .reorder_alert_fallback(
                &history,
                &ReorderContext::new(500.0, 100.0, 3, 0.0),
                FitError::TimedOut { seconds: 5 },
            )
            .unwrap();

        assert!(decision.used_fallback);
        assert_eq!(decision.days_until_reorder, 16);
        assert_eq!(decision.usage.next_7_days, 175.0);
    }

    #[test]
    fn test_reorder_alert_fallback_still_validates() {
        let service = ForecastService::new(Arc::new(FailingFitter));
        let err = service
            .reorder_alert_fallback(
                &series(&[5.0]),
                &ReorderContext::new(500.0, 100.0, 3, 0.0),
                FitError::TimedOut { seconds: 5 },
            )
            .unwrap_err();
        assert_eq!(err.code(), "TOO_SHORT");

        let err = service
            .reorder_alert_fallback(
                &series(&[5.0, 6.0, 7.0]),
                &ReorderContext::new(500.0, 100.0, 3, -1.0),
                FitError::TimedOut { seconds: 5 },
            )
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_auto_forecast_failure_surfaces() {
        let service = ForecastService::new(Arc::new(FailingFitter));
        let err = service.auto_forecast(&ramp(30), &ForecastConfig::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Fitting(_)));
    }
}
