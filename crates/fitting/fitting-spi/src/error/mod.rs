//! Error module containing error types and result aliases

mod fit_error;

pub use fit_error::FitError;

/// Result type for fitting operations
pub type Result<T> = std::result::Result<T, FitError>;
