//! Forecast summary model

use serde::{Deserialize, Serialize};

/// Direction between the first and last forecast value
///
/// Demand paths report growing/declining, revenue paths increasing/decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Growing,
    Declining,
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Growing => "growing",
            TrendDirection::Declining => "declining",
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

/// Trend of a forecast path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Change from first to last value in percent; 0 when the first value is 0
    pub percentage: f64,
}

/// Aggregates derived from a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub total: f64,
    pub average: f64,
    /// 1-based position of the largest forecast value
    pub peak_index: Option<usize>,
    pub trend: Trend,
    /// Forecast mean vs. recent history in percent
    pub growth_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&TrendDirection::Growing).unwrap();
        assert_eq!(json, "\"growing\"");
        assert_eq!(TrendDirection::Decreasing.as_str(), "decreasing");
    }
}
