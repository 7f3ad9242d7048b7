//! Fitting error types

use thiserror::Error;

/// Errors raised while fitting or forecasting a SARIMA model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Not enough observations left after differencing for the requested order
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The requested order cannot be estimated
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Invalid argument to a fitted model
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The optimizer ended on a non-finite or degenerate objective
    #[error("Model failed to converge: {reason}")]
    ConvergenceFailure { reason: String },

    /// Every candidate of an automatic search failed to fit
    #[error("No viable model found after {attempted} candidate fits")]
    NoViableModel { attempted: usize },

    /// The fit did not complete within the caller's deadline
    #[error("Model fitting timed out after {seconds}s")]
    TimedOut { seconds: u64 },

    /// The numerical optimizer itself reported an error
    #[error("Optimizer error: {0}")]
    Optimizer(String),
}

impl FitError {
    /// Build a convergence failure from any displayable reason
    pub fn convergence(reason: impl Into<String>) -> Self {
        FitError::ConvergenceFailure {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_insufficient_data_message() {
        let error = FitError::InsufficientData {
            required: 14,
            actual: 9,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 14 points, got 9"
        );
    }

    #[test]
    fn test_convergence_helper() {
        let error = FitError::convergence("objective is NaN");
        assert_eq!(error.to_string(), "Model failed to converge: objective is NaN");
        assert!(matches!(error, FitError::ConvergenceFailure { .. }));
    }

    #[test]
    fn test_no_viable_model_message() {
        let error = FitError::NoViableModel { attempted: 12 };
        assert_eq!(
            error.to_string(),
            "No viable model found after 12 candidate fits"
        );
    }

    #[test]
    fn test_timed_out_message() {
        let error = FitError::TimedOut { seconds: 30 };
        assert_eq!(error.to_string(), "Model fitting timed out after 30s");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error + Send + Sync> = Box::new(FitError::InvalidOrder("d > 2".into()));
        assert!(error.source().is_none());
        assert_eq!(error.to_string(), "Invalid order: d > 2");
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FitError>();
    }
}
