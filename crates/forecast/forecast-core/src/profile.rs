//! Use-case profiles
//!
//! Each outward operation validates, resolves seasonality and bounds its
//! order search differently.

use fitting_spi::SearchBounds;
use forecast_spi::{ForecastError, Result};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationRules;

/// Outward operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    AutoForecast,
    ManualForecast,
    Evaluate,
    IngredientUsage,
    CategoryDemand,
    Revenue,
    ReorderAlert,
}

/// Per-operation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UseCaseProfile {
    pub validation: ValidationRules,
    /// Period used when seasonality is requested without one
    pub default_period: usize,
    pub bounds: SearchBounds,
    pub max_steps: usize,
    pub default_steps: usize,
}

/// Minimum training window of a backtest
pub const MIN_TRAIN_LENGTH: usize = 10;

/// Horizon of the reorder usage forecast
pub const REORDER_HORIZON: usize = 30;

impl UseCase {
    pub fn name(&self) -> &'static str {
        match self {
            UseCase::AutoForecast => "auto-forecast",
            UseCase::ManualForecast => "manual-forecast",
            UseCase::Evaluate => "evaluate",
            UseCase::IngredientUsage => "ingredient-usage",
            UseCase::CategoryDemand => "category-demand",
            UseCase::Revenue => "revenue",
            UseCase::ReorderAlert => "reorder-alert",
        }
    }

    pub fn profile(&self) -> UseCaseProfile {
        let wide = SearchBounds::new(5, 5, 2, 2);
        let narrow = SearchBounds::new(3, 3, 2, 2);
        match self {
            UseCase::AutoForecast | UseCase::ManualForecast => UseCaseProfile {
                validation: ValidationRules::lenient(3),
                default_period: 12,
                bounds: wide,
                max_steps: 365,
                default_steps: 6,
            },
            UseCase::Evaluate => UseCaseProfile {
                validation: ValidationRules::lenient(MIN_TRAIN_LENGTH),
                default_period: 12,
                bounds: wide,
                max_steps: usize::MAX,
                default_steps: 6,
            },
            UseCase::IngredientUsage => UseCaseProfile {
                validation: ValidationRules::lenient(3),
                default_period: 7,
                bounds: narrow,
                max_steps: 90,
                default_steps: 7,
            },
            UseCase::CategoryDemand => UseCaseProfile {
                validation: ValidationRules::strict(7),
                default_period: 7,
                bounds: wide,
                max_steps: 365,
                default_steps: 30,
            },
            UseCase::Revenue => UseCaseProfile {
                validation: ValidationRules::lenient(3),
                default_period: 12,
                bounds: wide,
                max_steps: 12,
                default_steps: 6,
            },
            UseCase::ReorderAlert => UseCaseProfile {
                validation: ValidationRules::lenient(2),
                default_period: 7,
                bounds: narrow,
                max_steps: REORDER_HORIZON,
                default_steps: REORDER_HORIZON,
            },
        }
    }
}

impl UseCaseProfile {
    /// Reject horizons outside `1..=max_steps`
    pub fn check_steps(&self, steps: usize) -> Result<usize> {
        if steps == 0 || steps > self.max_steps {
            return Err(ForecastError::invalid_parameter(
                "steps",
                format!("must be between 1 and {}, got {}", self.max_steps, steps),
            ));
        }
        Ok(steps)
    }
}
