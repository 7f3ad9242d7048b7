//! Deterministic fitters for unit tests

use std::sync::Mutex;

use fitting_spi::{
    ArimaOrder, AutoFitRequest, FitError, FittedModel, ForecastBands, ModelFitter, SeasonalOrder,
};

/// Model forecasting a constant level with bands `level ± alpha`
pub struct FlatModel {
    level: f64,
    order: ArimaOrder,
    seasonal_order: SeasonalOrder,
}

impl FittedModel for FlatModel {
    fn order(&self) -> ArimaOrder {
        self.order
    }

    fn seasonal_order(&self) -> SeasonalOrder {
        self.seasonal_order
    }

    fn forecast(&self, steps: usize, alpha: f64) -> fitting_spi::Result<ForecastBands> {
        Ok(ForecastBands {
            mean: vec![self.level; steps],
            lower: vec![self.level - alpha; steps],
            upper: vec![self.level + alpha; steps],
        })
    }

    fn aic(&self) -> f64 {
        100.0
    }

    fn bic(&self) -> f64 {
        104.0
    }

    fn aicc(&self) -> Option<f64> {
        None
    }
}

/// Fitter whose models forecast a fixed level; remembers the last auto request
pub struct FlatFitter {
    level: f64,
    last_request: Mutex<Option<(usize, AutoFitRequest)>>,
}

impl FlatFitter {
    pub fn new(level: f64) -> Self {
        Self {
            level,
            last_request: Mutex::new(None),
        }
    }

    /// Series length and request of the most recent automatic fit
    pub fn last_request(&self) -> Option<(usize, AutoFitRequest)> {
        *self.last_request.lock().unwrap()
    }
}

impl ModelFitter for FlatFitter {
    fn fit_auto(
        &self,
        series: &[f64],
        request: &AutoFitRequest,
    ) -> fitting_spi::Result<Box<dyn FittedModel>> {
        *self.last_request.lock().unwrap() = Some((series.len(), *request));
        let seasonal_order = if request.is_seasonal() {
            SeasonalOrder::new(1, 1, 1, request.period)
        } else {
            SeasonalOrder::none()
        };
        Ok(Box::new(FlatModel {
            level: self.level,
            order: ArimaOrder::new(1, 1, 1),
            seasonal_order,
        }))
    }

    fn fit_manual(
        &self,
        _series: &[f64],
        order: ArimaOrder,
        seasonal_order: SeasonalOrder,
    ) -> fitting_spi::Result<Box<dyn FittedModel>> {
        Ok(Box::new(FlatModel {
            level: self.level,
            order,
            seasonal_order,
        }))
    }
}

/// Model forecasting a fixed path; bands collapse onto it
pub struct PathFitter {
    path: Vec<f64>,
}

impl PathFitter {
    pub fn new(path: Vec<f64>) -> Self {
        Self { path }
    }
}

struct PathModel {
    path: Vec<f64>,
}

impl FittedModel for PathModel {
    fn order(&self) -> ArimaOrder {
        ArimaOrder::new(0, 1, 0)
    }

    fn seasonal_order(&self) -> SeasonalOrder {
        SeasonalOrder::none()
    }

    fn forecast(&self, steps: usize, _alpha: f64) -> fitting_spi::Result<ForecastBands> {
        let mean = (0..steps)
            .map(|i| self.path[i.min(self.path.len() - 1)])
            .collect();
        Ok(ForecastBands::degenerate(mean))
    }

    fn aic(&self) -> f64 {
        0.0
    }

    fn bic(&self) -> f64 {
        0.0
    }

    fn aicc(&self) -> Option<f64> {
        Some(0.0)
    }
}

impl ModelFitter for PathFitter {
    fn fit_auto(
        &self,
        _series: &[f64],
        _request: &AutoFitRequest,
    ) -> fitting_spi::Result<Box<dyn FittedModel>> {
        Ok(Box::new(PathModel {
            path: self.path.clone(),
        }))
    }

    fn fit_manual(
        &self,
        _series: &[f64],
        _order: ArimaOrder,
        _seasonal_order: SeasonalOrder,
    ) -> fitting_spi::Result<Box<dyn FittedModel>> {
        Ok(Box::new(PathModel {
            path: self.path.clone(),
        }))
    }
}

/// Fitter that never converges
pub struct FailingFitter;

impl ModelFitter for FailingFitter {
    fn fit_auto(
        &self,
        _series: &[f64],
        _request: &AutoFitRequest,
    ) -> fitting_spi::Result<Box<dyn FittedModel>> {
        Err(FitError::NoViableModel { attempted: 4 })
    }

    fn fit_manual(
        &self,
        _series: &[f64],
        _order: ArimaOrder,
        _seasonal_order: SeasonalOrder,
    ) -> fitting_spi::Result<Box<dyn FittedModel>> {
        Err(FitError::convergence("objective is not finite"))
    }
}
