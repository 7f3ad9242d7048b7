//! Forecast Service Provider Interface
//!
//! Data model and error taxonomy shared by the forecasting core and its
//! transports:
//!
//! - [`TimeSeries`]: validated, timestamp-ordered input series
//! - [`ForecastConfig`], [`ReorderContext`]: per-request configuration
//! - [`ForecastResult`], [`SummaryResult`], [`ReorderDecision`], [`EvaluationResult`]: outputs
//! - [`ForecastError`], [`ValidationReason`]: error taxonomy

pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use error::{ForecastError, Result, ValidationReason};
pub use model::{
    confidence_alpha, parse_timestamp, AlertStatus, BusinessForecast, EvaluationMetrics, EvaluationResult,
    FitMetrics, ForecastConfig, ForecastResult, ModelDescriptor, Observation, Priority,
    ReorderContext, ReorderDecision, SummaryResult, TimeSeries, Trend, TrendDirection,
    UsageWindows,
};

// Orders are part of the request/result model
pub use fitting_spi::{ArimaOrder, FitError, SeasonalOrder};
