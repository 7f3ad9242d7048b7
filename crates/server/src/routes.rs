//! API route handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use forecast_facade::{
    AutoForecastRequest, CategoryDemandRequest, ErrorResponse, EvaluationRequest, FitError,
    ForecastError, ForecastService, IngredientUsageRequest, LegacyForecastRequest,
    ManualForecastRequest, Operation, ReorderAlertRequest, RevenueRequest, ServiceInfo,
};

use crate::pool::FitPool;

const SERVICE_NAME: &str = "Stockcast Forecast Service";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ForecastService,
    pub pool: FitPool,
}

/// Error surfaced by a handler
#[derive(Debug)]
pub enum ApiError {
    Forecast(ForecastError),
    Body(StatusCode, String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forecast(ForecastError::Fitting(FitError::TimedOut { .. })) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Forecast(ForecastError::Fitting(_)) => StatusCode::BAD_REQUEST,
            ApiError::Forecast(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Body(status, _) => *status,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Forecast(error) => ErrorResponse::from(error),
            ApiError::Body(_, detail) => ErrorResponse {
                success: false,
                error: "INVALID_REQUEST".to_string(),
                detail: detail.clone(),
            },
        }
    }
}

impl From<ForecastError> for ApiError {
    fn from(error: ForecastError) -> Self {
        ApiError::Forecast(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Decode, run on the fitting pool, encode
pub async fn serve<O: Operation>(
    State(state): State<AppState>,
    payload: Result<Json<O>, JsonRejection>,
) -> Result<Json<O::Response>, ApiError> {
    let Json(request) = payload?;
    match state.pool.run(state.service.clone(), request).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => {
            tracing::info!(operation = O::NAME, code = error.code(), "request failed: {error}");
            Err(error.into())
        }
    }
}

/// Service banner for `/`, `/health` and `/health/live`
pub async fn banner() -> Json<ServiceInfo> {
    Json(ServiceInfo::running(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(banner))
        .route("/health/live", get(banner))
        .route("/forecast/auto", post(serve::<AutoForecastRequest>))
        .route("/forecast/manual", post(serve::<ManualForecastRequest>))
        .route("/evaluate", post(serve::<EvaluationRequest>))
        .route("/business/ingredient-usage", post(serve::<IngredientUsageRequest>))
        .route("/business/category-demand", post(serve::<CategoryDemandRequest>))
        .route("/business/revenue", post(serve::<RevenueRequest>))
        .route("/business/reorder-alert", post(serve::<ReorderAlertRequest>))
        .route("/forecast", post(serve::<LegacyForecastRequest>))
        .with_state(state)
}
