//! Model fitter contract

use crate::contract::FittedModel;
use crate::error::Result;
use crate::model::{ArimaOrder, AutoFitRequest, SeasonalOrder};

/// Entry points of a Model Fitting Library
///
/// Implementations are stateless with respect to requests: identical inputs
/// (including the seed) must produce identical models.
pub trait ModelFitter: Send + Sync {
    /// Search for the best order within the request's bounds and fit it
    fn fit_auto(&self, series: &[f64], request: &AutoFitRequest) -> Result<Box<dyn FittedModel>>;

    /// Fit exactly the given orders
    ///
    /// Stationarity and invertibility are not enforced on the estimated
    /// coefficients.
    fn fit_manual(
        &self,
        series: &[f64],
        order: ArimaOrder,
        seasonal_order: SeasonalOrder,
    ) -> Result<Box<dyn FittedModel>>;
}
