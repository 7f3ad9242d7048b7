//! Contract module containing the fitting trait definitions

mod fitted_model;
mod model_fitter;

pub use fitted_model::FittedModel;
pub use model_fitter::ModelFitter;
