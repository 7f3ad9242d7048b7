//! Fitting worker pool
//!
//! Fitting is CPU-bound, so operations run on a dedicated rayon pool and the
//! async handler awaits the reply over a oneshot channel.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use forecast_facade::{FitError, ForecastError, ForecastService, Operation};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tokio::sync::oneshot;

#[derive(Clone)]
pub struct FitPool {
    pool: Arc<ThreadPool>,
    timeout: Option<Duration>,
}

impl FitPool {
    pub fn new(workers: usize, timeout: Option<Duration>) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fit-worker-{i}"))
            .build()?;
        Ok(Self {
            pool: Arc::new(pool),
            timeout,
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Execute `request` on the pool
    ///
    /// When the deadline passes the operation's
    /// [`on_fit_timeout`](Operation::on_fit_timeout) answer is returned; the
    /// job itself runs to completion and its result is dropped.
    pub async fn run<O: Operation>(
        &self,
        service: ForecastService,
        request: O,
    ) -> Result<O::Response, ForecastError> {
        let Some(limit) = self.timeout else {
            return self.submit(service, request).await;
        };

        let fallback = (request.clone(), service.clone());
        match tokio::time::timeout(limit, self.submit(service, request)).await {
            Ok(reply) => reply,
            Err(_) => {
                tracing::warn!(operation = O::NAME, seconds = limit.as_secs(), "fit timed out");
                let (request, service) = fallback;
                request.on_fit_timeout(
                    &service,
                    FitError::TimedOut {
                        seconds: limit.as_secs(),
                    },
                )
            }
        }
    }

    fn submit<O: Operation>(
        &self,
        service: ForecastService,
        request: O,
    ) -> impl Future<Output = Result<O::Response, ForecastError>> + Send {
        let (tx, rx) = oneshot::channel();
        self.pool.spawn(move || {
            let _ = tx.send(request.execute(&service));
        });
        async move {
            match rx.await {
                Ok(reply) => reply,
                Err(_) => Err(FitError::Optimizer("fit worker terminated".to_string()).into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_facade::{
        default_service, service_with, ArimaOrder, AutoFitRequest, FittedModel, ModelFitter,
        ReorderAlertRequest, SeasonalOrder,
    };
    use serde::Deserialize;

    #[derive(Clone, Deserialize)]
    struct Sleep {
        millis: u64,
    }

    impl Operation for Sleep {
        type Response = u64;
        const NAME: &'static str = "sleep";

        fn execute(self, _service: &ForecastService) -> forecast_facade::Result<u64> {
            std::thread::sleep(Duration::from_millis(self.millis));
            Ok(self.millis)
        }
    }

    #[tokio::test]
    async fn test_runs_on_pool() {
        let pool = FitPool::new(2, None).unwrap();
        assert_eq!(pool.workers(), 2);

        let reply = pool.run(default_service(), Sleep { millis: 5 }).await.unwrap();
        assert_eq!(reply, 5);
    }

    #[tokio::test]
    async fn test_deadline() {
        let pool = FitPool::new(1, Some(Duration::from_millis(20))).unwrap();

        let error = pool
            .run(default_service(), Sleep { millis: 1500 })
            .await
            .unwrap_err();
        assert_eq!(error.code(), "FIT_TIMEOUT");
    }

    #[tokio::test]
    async fn test_operation_errors_pass_through() {
        let pool = FitPool::new(1, None).unwrap();
        let request: forecast_facade::AutoForecastRequest =
            serde_json::from_str(r#"{"series":[{"date":"2024-01-01","value":1}]}"#).unwrap();

        let error = pool.run(default_service(), request).await.unwrap_err();
        assert!(error.is_input_error());
    }

    /// Fitter that stalls and then gives up
    struct StallingFitter(Duration);

    impl ModelFitter for StallingFitter {
        fn fit_auto(
            &self,
            _series: &[f64],
            _request: &AutoFitRequest,
        ) -> Result<Box<dyn FittedModel>, FitError> {
            std::thread::sleep(self.0);
            Err(FitError::NoViableModel { attempted: 4 })
        }

        fn fit_manual(
            &self,
            _series: &[f64],
            _order: ArimaOrder,
            _seasonal_order: SeasonalOrder,
        ) -> Result<Box<dyn FittedModel>, FitError> {
            std::thread::sleep(self.0);
            Err(FitError::NoViableModel { attempted: 1 })
        }
    }

    fn reorder_request(current_stock: f64, history: usize) -> ReorderAlertRequest {
        let usage: Vec<_> = (0..history)
            .map(|i| serde_json::json!({"date": format!("2024-05-{:02}", i + 1), "value": 20.0 + (i % 3) as f64}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "ingredient_id": "basil",
            "current_stock": current_stock,
            "usage_history": usage,
            "reorder_point": 100.0,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_reorder_alert_degrades_after_deadline() {
        let pool = FitPool::new(1, Some(Duration::from_millis(50))).unwrap();
        let service = service_with(StallingFitter(Duration::from_millis(500)));

        let response = pool.run(service, reorder_request(400.0, 12)).await.unwrap();

        assert!(response.fallback_forecast);
        assert_eq!(response.ingredient_id, "basil");
        // mean usage 21 per day: 400 - 21d <= 100 at d = 15
        assert_eq!(response.days_until_reorder, 15);
    }

    #[tokio::test]
    async fn test_reorder_deadline_keeps_input_errors() {
        let pool = FitPool::new(1, Some(Duration::from_millis(50))).unwrap();
        let service = service_with(StallingFitter(Duration::from_millis(500)));

        let error = pool.run(service, reorder_request(400.0, 1)).await.unwrap_err();
        assert_eq!(error.code(), "TOO_SHORT");
    }
}
