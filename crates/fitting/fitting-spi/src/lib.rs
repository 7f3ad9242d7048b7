//! Model Fitting Service Provider Interface
//!
//! Defines the boundary between the forecasting core and whatever estimates
//! ARIMA/SARIMA models:
//!
//! - [`ModelFitter`]: automatic (stepwise search) and manual fitting entry points
//! - [`FittedModel`]: a fitted model that can forecast and report information criteria
//! - [`ArimaOrder`], [`SeasonalOrder`]: model orders
//! - [`FitError`]: standardized error type for fitting failures

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{FittedModel, ModelFitter};
pub use error::{FitError, Result};
pub use model::{ArimaOrder, AutoFitRequest, ForecastBands, SearchBounds, SeasonalOrder};
