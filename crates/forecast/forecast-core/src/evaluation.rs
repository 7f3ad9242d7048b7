//! Train/test backtesting

use forecast_spi::{
    EvaluationMetrics, EvaluationResult, ForecastError, Result, TimeSeries,
};

use crate::orchestrator::{ForecastOrchestrator, ForecastPlan};
use crate::profile::{UseCase, MIN_TRAIN_LENGTH};
use crate::seasonality::SeasonalityResolver;
use crate::validation::SeriesValidator;

/// Confidence level of the backtest fit; bands are discarded
const EVALUATION_CONFIDENCE: f64 = 0.95;

/// Mean absolute error
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    mean(actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()))
}

/// Root mean squared error
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mean(actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2))).sqrt()
}

/// Mean absolute percentage error in percent
///
/// A zero actual value makes the result infinite (or NaN when the prediction
/// is also zero); it is not suppressed.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    mean(actual.iter().zip(predicted).map(|(a, p)| ((a - p) / a).abs())) * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Splits a series, refits on the head and scores the tail
#[derive(Debug, Clone)]
pub struct EvaluationHarness {
    orchestrator: ForecastOrchestrator,
}

impl EvaluationHarness {
    pub fn new(orchestrator: ForecastOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn evaluate(
        &self,
        series: &TimeSeries,
        test_size: usize,
        seasonal: bool,
        seasonal_period: Option<usize>,
    ) -> Result<EvaluationResult> {
        if test_size == 0 {
            return Err(ForecastError::invalid_parameter("test_size", "must be at least 1"));
        }
        let required = test_size.saturating_add(MIN_TRAIN_LENGTH);
        if series.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: series.len(),
            });
        }

        let profile = UseCase::Evaluate.profile();
        SeriesValidator::new(profile.validation.with_min_length(required)).validate(series)?;

        let (train, test) = series.split_tail(test_size);
        let (effective_seasonal, period) = SeasonalityResolver::new(profile.default_period)
            .resolve(train.len(), seasonal, seasonal_period);

        let plan = ForecastPlan::automatic(
            effective_seasonal,
            period,
            test_size,
            EVALUATION_CONFIDENCE,
            profile.bounds,
        );
        let fitted = self.orchestrator.run(&train, &plan)?;

        let actual = test.values().to_vec();
        let predictions = fitted.forecast;
        let metrics = EvaluationMetrics {
            mae: mae(&actual, &predictions),
            rmse: rmse(&actual, &predictions),
            mape: mape(&actual, &predictions),
            aic: fitted.metrics.aic,
            bic: fitted.metrics.bic,
        };
        tracing::debug!(
            model = %fitted.model.label,
            train_size = train.len(),
            mae = metrics.mae,
            "backtest scored"
        );

        Ok(EvaluationResult {
            model: fitted.model,
            predictions,
            actual,
            metrics,
            train_size: train.len(),
            test_size,
        })
    }
}
