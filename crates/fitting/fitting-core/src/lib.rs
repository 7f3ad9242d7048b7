//! Model Fitting Core
//!
//! SARIMA implementation of the fitting SPI:
//!
//! - [`differencing`]: KPSS and seasonal-strength differencing selection
//! - [`estimation`]: conditional-sum-of-squares estimation (Nelder-Mead via argmin)
//! - [`SarimaModel`]: fitted model with ψ-weight prediction intervals
//! - [`StepwiseSearch`]: AIC-driven stepwise order search
//! - [`SarimaFitter`]: the [`ModelFitter`] entry point

pub mod differencing;
pub mod estimation;
pub mod fitter;
pub mod polynomial;
pub mod sarima;
pub mod stepwise;

// Re-export SPI types for implementations
pub use fitting_spi::{
    ArimaOrder, AutoFitRequest, FitError, FittedModel, ForecastBands, ModelFitter, Result,
    SearchBounds, SeasonalOrder,
};

pub use estimation::{Constraint, EstimationOptions, ModelSpec};
pub use fitter::SarimaFitter;
pub use sarima::SarimaModel;
pub use stepwise::StepwiseSearch;
