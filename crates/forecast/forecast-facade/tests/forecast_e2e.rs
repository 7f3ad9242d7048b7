//! End-to-end tests for the forecast facade
//!
//! Drives complete request/response workflows through JSON using only this
//! crate's API.

use forecast_facade::responses::{
    CategoryDemandResponse, EvaluationResponse, IngredientUsageResponse, ReorderAlertResponse,
    RevenueResponse,
};
use forecast_facade::{
    default_service, AutoForecastRequest, CategoryDemandRequest, ErrorResponse, EvaluationRequest,
    ForecastResponse, IngredientUsageRequest, LegacyForecastRequest, LegacyForecastResponse,
    ManualForecastRequest, Operation, ReorderAlertRequest, RevenueRequest,
};
use serde_json::{json, Value};

fn monthly(n: usize) -> Value {
    let points: Vec<Value> = (0..n)
        .map(|i| {
            let t = i as f64;
            let value = 120.0 + 2.0 * t + 15.0 * (2.0 * std::f64::consts::PI * t / 12.0).cos() + (t * 0.9).sin() * 2.0;
            json!({
                "date": format!("{}-{:02}-01", 2021 + i / 12, i % 12 + 1),
                "value": value,
            })
        })
        .collect();
    Value::Array(points)
}

fn daily(n: usize) -> Value {
    let points: Vec<Value> = (0..n)
        .map(|i| {
            let t = i as f64;
            let value = 15.0 + 3.0 * (2.0 * std::f64::consts::PI * t / 7.0).sin() + (t * 1.3).cos();
            json!({
                "date": format!("2024-03-{:02}", i + 1),
                "value": value,
            })
        })
        .collect();
    Value::Array(points)
}

fn run<O: Operation>(body: Value) -> Value {
    let request: O = serde_json::from_value(body).unwrap();
    let response = request.execute(&default_service()).unwrap();
    serde_json::to_value(response).unwrap()
}

#[test]
fn e2e_auto_forecast_round_trip() {
    let json = run::<AutoForecastRequest>(json!({ "series": monthly(36), "steps": 4 }));
    let response: ForecastResponse = serde_json::from_value(json.clone()).unwrap();

    assert!(response.success);
    assert_eq!(response.steps, 4);
    assert_eq!(response.forecast.len(), 4);
    assert_eq!(response.confidence_interval.level, Some(0.95));
    assert!(json["order"].is_array());
    assert_eq!(json["seasonal_order"].as_array().unwrap().len(), 4);
}

#[test]
fn e2e_manual_forecast() {
    let json = run::<ManualForecastRequest>(json!({
        "series": monthly(36),
        "steps": 3,
        "order": [0, 1, 1],
        "confidence_level": 0.9,
    }));

    assert_eq!(json["model"], "ARIMA(0, 1, 1)");
    assert_eq!(json["confidence_interval"]["level"], 0.9);
}

#[test]
fn e2e_legacy_and_canonical_agree() {
    let legacy = run::<LegacyForecastRequest>(json!({ "series": monthly(30), "steps": 3 }));
    let canonical = run::<AutoForecastRequest>(json!({
        "series": monthly(30),
        "steps": 3,
        "seasonal_period": 12,
    }));

    let legacy: LegacyForecastResponse = serde_json::from_value(legacy).unwrap();
    let canonical: ForecastResponse = serde_json::from_value(canonical).unwrap();
    assert_eq!(legacy.forecast, canonical.forecast);
    assert_eq!(legacy.confidence.upper, canonical.confidence_interval.upper);
    assert_eq!(legacy.model, canonical.model);
}

#[test]
fn e2e_evaluation() {
    let json = run::<EvaluationRequest>(json!({ "series": monthly(36), "test_size": 6 }));
    let response: EvaluationResponse = serde_json::from_value(json).unwrap();

    assert_eq!(response.train_size, 30);
    assert_eq!(response.predictions.len(), response.actual.len());
    assert!(response.metrics.mape.is_finite());
}

#[test]
fn e2e_business_operations() {
    let usage: IngredientUsageResponse = serde_json::from_value(run::<IngredientUsageRequest>(json!({
        "ingredient_id": "tomatoes",
        "usage_history": daily(28),
    })))
    .unwrap();
    assert_eq!(usage.ingredient_id, "tomatoes");
    assert_eq!(usage.forecast_days, 7);

    let demand: CategoryDemandResponse = serde_json::from_value(run::<CategoryDemandRequest>(json!({
        "category_id": "salads",
        "sales_history": daily(28),
        "steps": 14,
    })))
    .unwrap();
    assert_eq!(demand.demand_forecast.len(), 14);
    assert!(demand.trend.percentage.is_finite());

    let revenue: RevenueResponse = serde_json::from_value(run::<RevenueRequest>(json!({
        "business_id": "bistro",
        "revenue_history": monthly(36),
    })))
    .unwrap();
    assert_eq!(revenue.forecast_months, 6);
}

#[test]
fn e2e_reorder_alert_wire_format() {
    let json = run::<ReorderAlertRequest>(json!({
        "ingredient_id": "flour",
        "current_stock": 40.0,
        "usage_history": daily(21),
        "reorder_point": 60.0,
    }));

    assert_eq!(json["alert_status"], "CRITICAL");
    assert_eq!(json["priority"], "HIGH");
    assert_eq!(json["should_reorder"], true);
    let response: ReorderAlertResponse = serde_json::from_value(json).unwrap();
    assert!(response.recommended_order_quantity >= 0.0);
}

#[test]
fn e2e_error_body() {
    let request: AutoForecastRequest = serde_json::from_value(json!({
        "series": [
            {"date": "2024-01-01", "value": 1.0},
            {"date": "2024-01-02", "value": null},
            {"date": "2024-01-03", "value": 2.0},
        ],
    }))
    .unwrap();

    let error = request.execute(&default_service()).unwrap_err();
    let body = serde_json::to_value(ErrorResponse::from(&error)).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "CONTAINS_NULL");
}
