//! Response shapes for the forecasting operations

use fitting_spi::{ArimaOrder, SeasonalOrder};
use forecast_spi::{
    AlertStatus, EvaluationMetrics, FitMetrics, ForecastError, ForecastResult, Priority, Trend,
    TrendDirection, UsageWindows,
};
use serde::{Deserialize, Serialize};

/// Prediction interval bounds, optionally with their coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub level: Option<f64>,
}

impl ConfidenceBand {
    fn from_result(result: &ForecastResult, with_level: bool) -> Self {
        Self {
            lower: result.lower.clone(),
            upper: result.upper.clone(),
            level: with_level.then_some(result.confidence_level),
        }
    }
}

/// Response of the automatic and manual forecast operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub success: bool,
    pub model: String,
    pub order: ArimaOrder,
    pub seasonal_order: SeasonalOrder,
    pub forecast: Vec<f64>,
    pub confidence_interval: ConfidenceBand,
    pub metrics: FitMetrics,
    pub steps: usize,
}

impl From<ForecastResult> for ForecastResponse {
    fn from(result: ForecastResult) -> Self {
        Self {
            success: true,
            confidence_interval: ConfidenceBand::from_result(&result, true),
            steps: result.steps(),
            model: result.model.label,
            order: result.model.order,
            seasonal_order: result.model.seasonal_order,
            forecast: result.forecast,
            metrics: result.metrics,
        }
    }
}

/// Metric that stays a number when finite and is sent as `"inf"`, `"-inf"`
/// or `"NaN"` otherwise
mod metric {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(de::Error::custom(format!("invalid metric '{}'", other))),
            },
        }
    }
}

/// Backtest metrics on the wire
///
/// MAPE is infinite when the held-out window contains a zero; such values are
/// sent as strings rather than JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetricsBody {
    #[serde(with = "metric")]
    pub mae: f64,
    #[serde(with = "metric")]
    pub rmse: f64,
    #[serde(with = "metric")]
    pub mape: f64,
    #[serde(with = "metric")]
    pub aic: f64,
    #[serde(with = "metric")]
    pub bic: f64,
}

impl From<EvaluationMetrics> for EvaluationMetricsBody {
    fn from(metrics: EvaluationMetrics) -> Self {
        Self {
            mae: metrics.mae,
            rmse: metrics.rmse,
            mape: metrics.mape,
            aic: metrics.aic,
            bic: metrics.bic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub success: bool,
    pub model: String,
    pub metrics: EvaluationMetricsBody,
    pub predictions: Vec<f64>,
    pub actual: Vec<f64>,
    pub train_size: usize,
    pub test_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsageResponse {
    pub success: bool,
    pub ingredient_id: String,
    pub forecast_days: usize,
    pub daily_usage_forecast: Vec<f64>,
    pub confidence_interval: ConfidenceBand,
    pub total_forecasted_usage: f64,
    pub average_daily_usage: f64,
    pub peak_usage_day: Option<usize>,
    pub model: String,
    pub metrics: FitMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDemandResponse {
    pub success: bool,
    pub category_id: String,
    pub forecast_periods: usize,
    pub demand_forecast: Vec<f64>,
    pub confidence_interval: ConfidenceBand,
    pub total_forecasted_demand: f64,
    pub trend: Trend,
    pub model: String,
    pub metrics: FitMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueResponse {
    pub success: bool,
    pub business_id: String,
    pub forecast_months: usize,
    pub revenue_forecast: Vec<f64>,
    pub confidence_interval: ConfidenceBand,
    pub total_forecasted_revenue: f64,
    pub average_monthly_revenue: f64,
    pub growth_rate: f64,
    pub trend: TrendDirection,
    pub model: String,
    pub metrics: FitMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderAlertResponse {
    pub success: bool,
    pub ingredient_id: String,
    pub alert_status: AlertStatus,
    pub should_reorder: bool,
    pub current_stock: f64,
    pub reorder_point: f64,
    pub days_until_reorder: usize,
    pub days_until_stockout: Option<usize>,
    pub recommended_order_quantity: f64,
    pub forecasted_usage: UsageWindows,
    pub alert_message: String,
    pub priority: Priority,
    /// Usage is the historical mean because the fit failed
    pub fallback_forecast: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyConfidence {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Response of the legacy `/forecast` route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyForecastResponse {
    pub model: String,
    pub forecast: Vec<f64>,
    pub confidence: LegacyConfidence,
}

impl From<ForecastResult> for LegacyForecastResponse {
    fn from(result: ForecastResult) -> Self {
        Self {
            model: result.model.label,
            forecast: result.forecast,
            confidence: LegacyConfidence {
                lower: result.lower,
                upper: result.upper,
            },
        }
    }
}

/// Error body shared by every operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub detail: String,
}

impl From<&ForecastError> for ErrorResponse {
    fn from(error: &ForecastError) -> Self {
        Self {
            success: false,
            error: error.code().to_string(),
            detail: error.to_string(),
        }
    }
}

/// Service banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub models: Vec<String>,
    pub version: String,
}

impl ServiceInfo {
    pub fn running(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: "running".to_string(),
            models: vec!["ARIMA".to_string(), "SARIMA".to_string()],
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_spi::ModelDescriptor;

    fn result() -> ForecastResult {
        ForecastResult {
            forecast: vec![10.0, 11.0],
            lower: vec![8.0, 8.5],
            upper: vec![12.0, 13.5],
            model: ModelDescriptor::new(ArimaOrder::new(0, 1, 1), SeasonalOrder::none()),
            metrics: FitMetrics {
                aic: 50.0,
                bic: 52.0,
                aicc: None,
            },
            confidence_level: 0.9,
        }
    }

    #[test]
    fn test_forecast_response_shape() {
        let json = serde_json::to_value(ForecastResponse::from(result())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["model"], "ARIMA(0, 1, 1)");
        assert_eq!(json["order"], serde_json::json!([0, 1, 1]));
        assert_eq!(json["seasonal_order"], serde_json::json!([0, 0, 0, 0]));
        assert_eq!(json["confidence_interval"]["level"], 0.9);
        assert_eq!(json["metrics"]["aicc"], serde_json::Value::Null);
        assert_eq!(json["steps"], 2);
    }

    #[test]
    fn test_legacy_response_shape() {
        let json = serde_json::to_value(LegacyForecastResponse::from(result())).unwrap();
        assert_eq!(json["confidence"]["lower"], serde_json::json!([8.0, 8.5]));
        assert!(json.get("success").is_none());
    }

    #[test]
    fn test_error_body() {
        let error = ForecastError::InsufficientData {
            required: 16,
            actual: 3,
        };
        let body = ErrorResponse::from(&error);
        assert!(!body.success);
        assert_eq!(body.error, "INSUFFICIENT_DATA");
        assert!(body.detail.contains("16"));
    }

    #[test]
    fn test_service_banner() {
        let info = ServiceInfo::running("Forecast Service", "0.3.0");
        assert_eq!(info.models, vec!["ARIMA", "SARIMA"]);
    }

    #[test]
    fn test_infinite_mape_stays_visible() {
        let response = EvaluationResponse {
            success: true,
            model: "ARIMA(0, 1, 0)".to_string(),
            metrics: EvaluationMetricsBody::from(EvaluationMetrics {
                mae: 1.5,
                rmse: 2.0,
                mape: f64::INFINITY,
                aic: 40.0,
                bic: 42.0,
            }),
            predictions: vec![1.0, 2.0],
            actual: vec![0.0, 3.5],
            train_size: 20,
            test_size: 2,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["metrics"]["mape"], "inf");
        assert_eq!(json["metrics"]["mae"], 1.5);

        let back: EvaluationResponse = serde_json::from_value(json).unwrap();
        assert!(back.metrics.mape.is_infinite());
        assert_eq!(back.metrics.rmse, 2.0);

        let nan = EvaluationMetricsBody {
            mape: f64::NAN,
            ..response.metrics
        };
        assert_eq!(serde_json::to_value(nan).unwrap()["mape"], "NaN");
    }
}
