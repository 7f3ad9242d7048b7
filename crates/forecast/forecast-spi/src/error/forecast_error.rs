//! Forecast error types

use fitting_spi::FitError;
use thiserror::Error;

/// Why an input series was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationReason {
    /// Fewer observations than the use case requires
    TooShort { required: usize, actual: usize },
    /// At least one value is missing
    ContainsNull,
    /// At least one value is below zero
    ContainsNegative,
    /// All values are identical
    ZeroVariance,
    /// Standard deviation below the modeling threshold
    LowVariance { std_dev: f64 },
    /// Two observations share a timestamp
    DuplicateTimestamp,
}

impl ValidationReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::TooShort { .. } => "TOO_SHORT",
            ValidationReason::ContainsNull => "CONTAINS_NULL",
            ValidationReason::ContainsNegative => "CONTAINS_NEGATIVE",
            ValidationReason::ZeroVariance => "ZERO_VARIANCE",
            ValidationReason::LowVariance { .. } => "LOW_VARIANCE",
            ValidationReason::DuplicateTimestamp => "DUPLICATE_TIMESTAMP",
        }
    }
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::TooShort { required, actual } => write!(
                f,
                "need at least {} observations, got {}",
                required, actual
            ),
            ValidationReason::ContainsNull => write!(f, "data contains NaN values"),
            ValidationReason::ContainsNegative => write!(f, "data contains negative values"),
            ValidationReason::ZeroVariance => {
                write!(f, "data has no variance (all values are the same)")
            }
            ValidationReason::LowVariance { std_dev } => {
                write!(f, "data has very low variance (std={:.4})", std_dev)
            }
            ValidationReason::DuplicateTimestamp => {
                write!(f, "series contains duplicate timestamps")
            }
        }
    }
}

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The input series failed a quality check
    #[error("Validation failed [{}]: {reason}", .reason.code())]
    Validation { reason: ValidationReason },

    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The model fitting library failed
    #[error("Model fitting failed: {0}")]
    Fitting(#[from] FitError),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ForecastError {
    pub fn validation(reason: ValidationReason) -> Self {
        ForecastError::Validation { reason }
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for transports
    pub fn code(&self) -> &'static str {
        match self {
            ForecastError::Validation { reason } => reason.code(),
            ForecastError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            ForecastError::Fitting(FitError::TimedOut { .. }) => "FIT_TIMEOUT",
            ForecastError::Fitting(_) => "FITTING_ERROR",
            ForecastError::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }

    /// True for errors caused by the caller's input rather than the fit
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ForecastError::Fitting(_))
    }
}
