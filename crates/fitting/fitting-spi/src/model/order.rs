//! ARIMA and seasonal orders

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-seasonal order (p, d, q)
///
/// Serialized as a three-element array, e.g. `[1, 1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize, usize)", into = "(usize, usize, usize)")]
pub struct ArimaOrder {
    /// Autoregressive order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// Moving-average order
    pub q: usize,
}

impl ArimaOrder {
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl From<(usize, usize, usize)> for ArimaOrder {
    fn from((p, d, q): (usize, usize, usize)) -> Self {
        Self { p, d, q }
    }
}

impl From<ArimaOrder> for (usize, usize, usize) {
    fn from(order: ArimaOrder) -> Self {
        (order.p, order.d, order.q)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

/// Seasonal order (P, D, Q, m)
///
/// Serialized as a four-element array, e.g. `[1, 1, 1, 12]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(
    from = "(usize, usize, usize, usize)",
    into = "(usize, usize, usize, usize)"
)]
pub struct SeasonalOrder {
    /// Seasonal autoregressive order (P)
    pub p: usize,
    /// Seasonal differencing order (D)
    pub d: usize,
    /// Seasonal moving-average order (Q)
    pub q: usize,
    /// Observations per seasonal cycle (m)
    pub m: usize,
}

impl SeasonalOrder {
    pub const fn new(p: usize, d: usize, q: usize, m: usize) -> Self {
        Self { p, d, q, m }
    }

    /// The empty seasonal order `(0, 0, 0, 0)`
    pub const fn none() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// True when the order contributes nothing seasonal to the model
    pub fn is_trivial(&self) -> bool {
        self.m <= 1 || (self.p == 0 && self.d == 0 && self.q == 0)
    }

    /// Lag span of the seasonal differencing operator, `D * m`
    pub fn differencing_span(&self) -> usize {
        if self.m <= 1 {
            0
        } else {
            self.d * self.m
        }
    }
}

impl Default for SeasonalOrder {
    fn default() -> Self {
        Self::none()
    }
}

impl From<(usize, usize, usize, usize)> for SeasonalOrder {
    fn from((p, d, q, m): (usize, usize, usize, usize)) -> Self {
        Self { p, d, q, m }
    }
}

impl From<SeasonalOrder> for (usize, usize, usize, usize) {
    fn from(order: SeasonalOrder) -> Self {
        (order.p, order.d, order.q, order.m)
    }
}

impl fmt::Display for SeasonalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.p, self.d, self.q, self.m)
    }
}
