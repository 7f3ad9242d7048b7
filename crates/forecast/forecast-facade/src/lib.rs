//! Forecast Facade
//!
//! High-level entry point to the forecasting stack. Re-exports all public
//! types and wires the SARIMA fitter into a [`ForecastService`].

use std::sync::Arc;

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Fitting boundary and the default fitter
pub use fitting_core::{EstimationOptions, SarimaFitter, SarimaModel};
pub use fitting_spi::{
    ArimaOrder, AutoFitRequest, FitError, FittedModel, ForecastBands, ModelFitter, SearchBounds,
    SeasonalOrder,
};

// Re-export SPI model types
pub use forecast_spi::{
    EvaluationMetrics, FitMetrics, Observation, Trend, TrendDirection, UsageWindows,
};

/// Service backed by [`SarimaFitter`] with default estimation options
pub fn default_service() -> ForecastService {
    service_with(SarimaFitter::default())
}

/// Service backed by the given fitter
pub fn service_with<F: ModelFitter + 'static>(fitter: F) -> ForecastService {
    tracing::debug!("building forecast service");
    ForecastService::new(Arc::new(fitter))
}
