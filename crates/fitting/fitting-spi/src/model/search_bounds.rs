//! Bounds and settings for automatic order search

use serde::{Deserialize, Serialize};

/// Upper bounds of a stepwise order search
///
/// Lower bounds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBounds {
    /// Maximum AR order (p)
    pub max_p: usize,
    /// Maximum MA order (q)
    pub max_q: usize,
    /// Maximum seasonal AR order (P)
    pub max_seasonal_p: usize,
    /// Maximum seasonal MA order (Q)
    pub max_seasonal_q: usize,
    /// Maximum non-seasonal differencing
    pub max_d: usize,
    /// Maximum seasonal differencing
    pub max_seasonal_d: usize,
    /// Cap on the number of candidate fits
    pub max_models: usize,
}

impl SearchBounds {
    /// Bounds with the given (p, q) and (P, Q) ceilings and default differencing caps
    pub fn new(max_p: usize, max_q: usize, max_seasonal_p: usize, max_seasonal_q: usize) -> Self {
        Self {
            max_p,
            max_q,
            max_seasonal_p,
            max_seasonal_q,
            ..Self::default()
        }
    }
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_p: 5,
            max_q: 5,
            max_seasonal_p: 2,
            max_seasonal_q: 2,
            max_d: 2,
            max_seasonal_d: 1,
            max_models: 100,
        }
    }
}

/// Everything an automatic fit needs besides the data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoFitRequest {
    /// Whether seasonal terms are searched
    pub seasonal: bool,
    /// Seasonal period (1 when non-seasonal)
    pub period: usize,
    /// Search ceilings
    pub bounds: SearchBounds,
    /// Seed for the optimizer's initial simplex
    pub seed: u64,
}

impl AutoFitRequest {
    pub fn new(seasonal: bool, period: usize, bounds: SearchBounds, seed: u64) -> Self {
        Self {
            seasonal,
            period,
            bounds,
            seed,
        }
    }

    /// True when the seasonal part of the search is active
    pub fn is_seasonal(&self) -> bool {
        self.seasonal && self.period > 1
    }
}
