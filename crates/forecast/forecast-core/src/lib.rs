//! Forecast Core
//!
//! Core implementations of the forecasting orchestration and decision layer:
//! series validation, seasonal-period resolution, orchestration over a
//! [`ModelFitter`], summaries, reorder decisions and backtesting.

pub mod evaluation;
pub mod orchestrator;
pub mod profile;
pub mod reorder;
pub mod seasonality;
pub mod service;
pub mod summary;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// Re-export SPI types for implementations
pub use fitting_spi::{ArimaOrder, ModelFitter, SearchBounds, SeasonalOrder};
pub use forecast_spi::{
    BusinessForecast, EvaluationResult, ForecastConfig, ForecastError, ForecastResult,
    ReorderContext, ReorderDecision, Result, SummaryResult, TimeSeries,
};

// Re-export main types
pub use evaluation::EvaluationHarness;
pub use orchestrator::{FitMode, ForecastOrchestrator, ForecastPlan};
pub use profile::{UseCase, UseCaseProfile};
pub use reorder::ReorderDecisionEngine;
pub use seasonality::SeasonalityResolver;
pub use service::ForecastService;
pub use summary::{ResultSummarizer, TrendVocabulary};
pub use validation::{SeriesValidator, ValidationRules};
