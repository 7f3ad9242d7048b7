//! Series validation
//!
//! Checks run in a fixed order and the first failure wins: length, missing
//! values, negative values, zero variance, low variance.

use forecast_spi::{ForecastError, Result, TimeSeries, ValidationReason};

/// Standard deviation below which fitting is numerically unstable
pub const LOW_VARIANCE_THRESHOLD: f64 = 0.01;

/// Which checks a use case applies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub min_length: usize,
    pub reject_null: bool,
    pub reject_negative: bool,
    pub reject_zero_variance: bool,
    pub reject_low_variance: bool,
}

impl ValidationRules {
    /// Length and missing-value checks only
    pub fn lenient(min_length: usize) -> Self {
        Self {
            min_length,
            reject_null: true,
            reject_negative: false,
            reject_zero_variance: false,
            reject_low_variance: false,
        }
    }

    /// Every check
    pub fn strict(min_length: usize) -> Self {
        Self {
            min_length,
            reject_null: true,
            reject_negative: true,
            reject_zero_variance: true,
            reject_low_variance: true,
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two points
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Validates series shape and quality against a rule set
#[derive(Debug, Clone, Copy)]
pub struct SeriesValidator {
    rules: ValidationRules,
}

impl SeriesValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Return the series unchanged or the first failed check
    pub fn validate<'a>(&self, series: &'a TimeSeries) -> Result<&'a TimeSeries> {
        let values = series.values();
        let fail = |reason| Err(ForecastError::validation(reason));

        if values.len() < self.rules.min_length {
            return fail(ValidationReason::TooShort {
                required: self.rules.min_length,
                actual: values.len(),
            });
        }
        if self.rules.reject_null && values.iter().any(|v| !v.is_finite()) {
            return fail(ValidationReason::ContainsNull);
        }
        if self.rules.reject_negative && values.iter().any(|v| *v < 0.0) {
            return fail(ValidationReason::ContainsNegative);
        }

        if self.rules.reject_zero_variance || self.rules.reject_low_variance {
            let std_dev = sample_std(values);
            if self.rules.reject_zero_variance && std_dev == 0.0 {
                return fail(ValidationReason::ZeroVariance);
            }
            if self.rules.reject_low_variance && std_dev < LOW_VARIANCE_THRESHOLD {
                return fail(ValidationReason::LowVariance { std_dev });
            }
        }
        Ok(series)
    }
}
