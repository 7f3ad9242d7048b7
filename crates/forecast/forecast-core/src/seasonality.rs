//! Seasonal period resolution
//!
//! Decides whether seasonal modeling applies and with which period. A series
//! shorter than two full cycles falls back to a non-seasonal fit.

/// Resolves the effective seasonal setting for a use case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalityResolver {
    default_period: usize,
}

impl SeasonalityResolver {
    pub fn new(default_period: usize) -> Self {
        Self { default_period }
    }

    pub fn default_period(&self) -> usize {
        self.default_period
    }

    /// `(effective_seasonal, effective_period)`; the period is 1 when seasonality is off
    pub fn resolve(
        &self,
        series_length: usize,
        requested_seasonal: bool,
        explicit_period: Option<usize>,
    ) -> (bool, usize) {
        if !requested_seasonal {
            return (false, 1);
        }
        let period = explicit_period.unwrap_or(self.default_period);
        if period < 2 || series_length < period.saturating_mul(2) {
            return (false, 1);
        }
        (true, period)
    }
}
