//! Reorder alert decisions
//!
//! Projects stock forward over a 30-day usage forecast and classifies the
//! position as CRITICAL, WARNING, ATTENTION or OK, first match wins.

use forecast_spi::{
    AlertStatus, ForecastError, ForecastResult, Priority, ReorderContext, ReorderDecision, Result,
    TimeSeries, UsageWindows,
};

use crate::profile::REORDER_HORIZON;

/// Days of usage ordered beyond the lead time
const SAFETY_PERIOD_DAYS: usize = 7;

/// Usage path for the decision, or the historical mean when fitting failed
///
/// Only [`ForecastError::Fitting`] triggers the fallback; every other error
/// propagates. The flag is true when the fallback was used.
pub fn usage_forecast_or_mean(
    outcome: Result<ForecastResult>,
    history: &TimeSeries,
) -> Result<(Vec<f64>, bool)> {
    match outcome {
        Ok(result) => Ok((result.forecast, false)),
        Err(ForecastError::Fitting(cause)) => {
            let mean = history.mean();
            tracing::warn!(error = %cause, mean, "usage forecast failed, using historical mean");
            Ok((vec![mean; REORDER_HORIZON], true))
        }
        Err(other) => Err(other),
    }
}

/// Pure decision function over an inventory position and a usage forecast
pub struct ReorderDecisionEngine;

impl ReorderDecisionEngine {
    /// Decide on a reorder from a usage forecast of up to 30 periods
    pub fn decide(context: &ReorderContext, usage: &[f64], used_fallback: bool) -> ReorderDecision {
        let horizon = &usage[..usage.len().min(REORDER_HORIZON)];
        let threshold = context.reorder_point + context.safety_stock;

        let mut days_until_reorder = None;
        let mut days_until_stockout = None;
        let mut cumulative = 0.0;
        for (i, daily) in horizon.iter().enumerate() {
            cumulative += daily;
            let day = i + 1;
            let stock = context.current_stock - cumulative;
            if days_until_reorder.is_none() && stock <= threshold {
                days_until_reorder = Some(day);
            }
            if days_until_stockout.is_none() && stock <= 0.0 {
                days_until_stockout = Some(day);
            }
        }
        let days_until_reorder = days_until_reorder.unwrap_or(REORDER_HORIZON);
        // Reaching zero on the last day is indistinguishable from "not within the horizon"
        let days_until_stockout = days_until_stockout.filter(|day| *day < REORDER_HORIZON);

        let lead_time = context.lead_time_days;
        let (status, should_reorder, priority, message) =
            if context.current_stock <= context.reorder_point {
                (
                    AlertStatus::Critical,
                    true,
                    Priority::High,
                    "Stock is at or below reorder point. Order immediately!".to_string(),
                )
            } else if days_until_reorder <= lead_time {
                (
                    AlertStatus::Warning,
                    true,
                    Priority::Medium,
                    format!(
                        "Stock will hit reorder point in {} days. Order now to avoid stockout.",
                        days_until_reorder
                    ),
                )
            } else if days_until_reorder <= lead_time.saturating_mul(2) {
                (
                    AlertStatus::Attention,
                    false,
                    Priority::Low,
                    format!(
                        "Stock will hit reorder point in {} days. Monitor closely.",
                        days_until_reorder
                    ),
                )
            } else {
                (
                    AlertStatus::Ok,
                    false,
                    Priority::None,
                    format!(
                        "Stock levels are healthy. Reorder needed in {} days.",
                        days_until_reorder
                    ),
                )
            };

        let cover_days = lead_time.saturating_add(SAFETY_PERIOD_DAYS);
        let usage_during_cover = window_sum(horizon, cover_days);
        let recommended_order_qty = (usage_during_cover
            - (context.current_stock - context.reorder_point)
            + context.safety_stock)
            .max(0.0);

        ReorderDecision {
            status,
            should_reorder,
            priority,
            days_until_reorder,
            days_until_stockout,
            recommended_order_qty,
            usage: UsageWindows {
                next_7_days: window_sum(horizon, 7),
                next_14_days: window_sum(horizon, 14),
                next_30_days: window_sum(horizon, 30),
            },
            message,
            used_fallback,
        }
    }
}

fn window_sum(values: &[f64], days: usize) -> f64 {
    values.iter().take(days).sum()
}
