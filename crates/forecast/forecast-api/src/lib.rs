//! Forecast Consumer API
//!
//! Request and response shapes for the forecasting operations.
//!
//! This crate provides:
//! - Wire types for series (`{date, value}` points)
//! - Request types with the use-case defaults, including the legacy shape
//!   and its compatibility adapter onto [`ForecastConfig`]
//! - Response types with stable field names
//! - [`Operation`]: executes a decoded request against a [`ForecastService`]
//! - Re-exports from SPI and core for convenience

pub mod operation;
pub mod requests;
pub mod responses;
pub mod wire;

// Re-export from core
pub use forecast_core::{
    evaluation, orchestrator, profile, reorder, seasonality, service, summary, validation,
    EvaluationHarness, ForecastOrchestrator, ForecastPlan, ForecastService, ReorderDecisionEngine,
    ResultSummarizer, SeasonalityResolver, SeriesValidator, UseCase, ValidationRules,
};

// Re-export model and errors from SPI
pub use forecast_spi::{
    AlertStatus, BusinessForecast, EvaluationResult, ForecastConfig, ForecastError,
    ForecastResult, ModelDescriptor, Priority, ReorderContext, ReorderDecision, Result,
    SummaryResult, TimeSeries, ValidationReason,
};

pub use operation::Operation;
pub use requests::{
    AutoForecastRequest, CategoryDemandRequest, EvaluationRequest, ForecastRequest,
    IngredientUsageRequest, LegacyForecastRequest, ManualForecastRequest, ReorderAlertRequest,
    RevenueRequest,
};
pub use responses::{ErrorResponse, ForecastResponse, LegacyForecastResponse, ServiceInfo};
pub use wire::{series_from_points, DataPoint};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AutoForecastRequest, DataPoint, ForecastRequest, LegacyForecastRequest, Operation,
    };
    pub use fitting_spi::{ArimaOrder, ModelFitter, SeasonalOrder};
    pub use forecast_core::{ForecastService, UseCase};
    pub use forecast_spi::{
        ForecastConfig, ForecastError, ForecastResult, ReorderContext, Result, TimeSeries,
    };
}
