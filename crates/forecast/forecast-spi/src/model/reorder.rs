//! Reorder alert model

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Inventory position supplied with a reorder check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderContext {
    pub current_stock: f64,
    /// Stock level that triggers an order
    pub reorder_point: f64,
    /// Days between ordering and receiving stock
    pub lead_time_days: usize,
    /// Buffer held above the reorder point
    pub safety_stock: f64,
}

impl ReorderContext {
    pub fn new(current_stock: f64, reorder_point: f64, lead_time_days: usize, safety_stock: f64) -> Self {
        Self {
            current_stock,
            reorder_point,
            lead_time_days,
            safety_stock,
        }
    }

    /// Reject non-finite quantities and negative safety stock
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("current_stock", self.current_stock),
            ("reorder_point", self.reorder_point),
            ("safety_stock", self.safety_stock),
        ] {
            if !value.is_finite() {
                return Err(ForecastError::invalid_parameter(name, "must be a finite number"));
            }
        }
        if self.safety_stock < 0.0 {
            return Err(ForecastError::invalid_parameter("safety_stock", "must not be negative"));
        }
        Ok(())
    }
}

/// Alert level, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    Critical,
    Warning,
    Attention,
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
    None,
}

/// Forecast usage over the next 7, 14 and 30 days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageWindows {
    pub next_7_days: f64,
    pub next_14_days: f64,
    pub next_30_days: f64,
}

/// Outcome of a reorder check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderDecision {
    pub status: AlertStatus,
    pub should_reorder: bool,
    pub priority: Priority,
    /// First day stock reaches the reorder threshold, 30 when not within the horizon
    pub days_until_reorder: usize,
    /// First day stock runs out, `None` when not within the horizon
    pub days_until_stockout: Option<usize>,
    pub recommended_order_qty: f64,
    pub usage: UsageWindows,
    pub message: String,
    /// The usage forecast is the historical mean because fitting failed
    pub used_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&AlertStatus::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&AlertStatus::Attention).unwrap(), "\"ATTENTION\"");
        assert_eq!(serde_json::to_string(&Priority::None).unwrap(), "\"NONE\"");
    }

    #[test]
    fn test_context_validation() {
        assert!(ReorderContext::new(100.0, 20.0, 3, 0.0).validate().is_ok());
        assert!(ReorderContext::new(f64::NAN, 20.0, 3, 0.0).validate().is_err());
        assert!(ReorderContext::new(100.0, 20.0, 3, -1.0).validate().is_err());
    }
}
