//! Backtest evaluation model

use serde::{Deserialize, Serialize};

use super::forecast_result::ModelDescriptor;

/// Accuracy on the held-out window plus fit criteria on the training window
///
/// `mape` is infinite or NaN when an actual value is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
    pub aic: f64,
    pub bic: f64,
}

/// Result of a train/test backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub model: ModelDescriptor,
    pub predictions: Vec<f64>,
    pub actual: Vec<f64>,
    pub metrics: EvaluationMetrics,
    pub train_size: usize,
    pub test_size: usize,
}
