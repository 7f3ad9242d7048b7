//! Fitted SARIMA model
//!
//! Wraps a CSS estimate together with the original series so that forecasts
//! can be produced on the original (undifferenced) scale.

use fitting_spi::{ArimaOrder, FitError, FittedModel, ForecastBands, Result, SeasonalOrder};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::differencing::apply_differencing;
use crate::estimation::{estimate, Coefficients, Constraint, EstimationOptions, ModelSpec};
use crate::polynomial::{
    ar_polynomial, autoregressive_weights, differencing_polynomial, ma_polynomial, multiply,
};

/// SARIMA(p,d,q)x(P,D,Q,m) fitted by conditional sum of squares
#[derive(Debug, Clone)]
pub struct SarimaModel {
    spec: ModelSpec,
    coefficients: Coefficients,
    sigma2: f64,
    log_likelihood: f64,
    n_eff: usize,
    /// Original observations
    history: Vec<f64>,
    /// Innovations aligned with `history` (zero where not estimated)
    innovations: Vec<f64>,
    aic: f64,
    bic: f64,
    aicc: Option<f64>,
}

impl SarimaModel {
    /// Fit the given orders to a series
    pub fn fit(
        series: &[f64],
        spec: ModelSpec,
        constraint: Constraint,
        options: &EstimationOptions,
    ) -> Result<Self> {
        validate_spec(&spec)?;
        if series.iter().any(|x| !x.is_finite()) {
            return Err(FitError::InvalidParameter {
                name: "series".to_string(),
                reason: "contains NaN or infinite values".to_string(),
            });
        }

        let m = spec.period();
        let w = apply_differencing(series, spec.order.d, spec.seasonal_order.d, m);
        let fit = estimate(&w, spec, constraint, options)?;

        let offset = series.len() - w.len();
        let mut innovations = vec![0.0; series.len()];
        innovations[offset..].copy_from_slice(&fit.residuals);

        let k = (spec.n_params() + 1) as f64;
        let n = fit.n_eff as f64;
        let aic = -2.0 * fit.log_likelihood + 2.0 * k;
        let bic = -2.0 * fit.log_likelihood + k * n.ln();
        let aicc = if n - k - 1.0 > 0.0 {
            Some(aic + 2.0 * k * (k + 1.0) / (n - k - 1.0))
        } else {
            None
        };

        tracing::trace!(
            order = %spec.order,
            seasonal_order = %spec.seasonal_order,
            aic,
            iterations = fit.iterations,
            "fitted SARIMA candidate"
        );

        Ok(Self {
            spec,
            coefficients: fit.coefficients,
            sigma2: fit.sigma2,
            log_likelihood: fit.log_likelihood,
            n_eff: fit.n_eff,
            history: series.to_vec(),
            innovations,
            aic,
            bic,
            aicc,
        })
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Innovation variance
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of residuals the likelihood is conditioned on
    pub fn n_eff(&self) -> usize {
        self.n_eff
    }

    /// ψ-weights of the integrated model, `ψ_0 = 1`
    fn psi_weights(ar: &[f64], ma: &[f64], count: usize) -> Vec<f64> {
        let mut psi = vec![0.0; count];
        if count == 0 {
            return psi;
        }
        psi[0] = 1.0;
        for j in 1..count {
            let mut value = ma.get(j - 1).copied().unwrap_or(0.0);
            for (i, a) in ar.iter().enumerate().take(j) {
                value += a * psi[j - i - 1];
            }
            psi[j] = value;
        }
        psi
    }
}

fn validate_spec(spec: &ModelSpec) -> Result<()> {
    if spec.order.d > 2 {
        return Err(FitError::InvalidOrder(format!(
            "differencing order d = {} exceeds 2",
            spec.order.d
        )));
    }
    let seasonal = spec.seasonal_order;
    let has_seasonal_terms = seasonal.p > 0 || seasonal.d > 0 || seasonal.q > 0;
    if has_seasonal_terms && seasonal.m < 2 {
        return Err(FitError::InvalidOrder(format!(
            "seasonal order {} needs a period of at least 2",
            seasonal
        )));
    }
    if seasonal.d > 1 {
        return Err(FitError::InvalidOrder(format!(
            "seasonal differencing D = {} exceeds 1",
            seasonal.d
        )));
    }
    Ok(())
}

impl FittedModel for SarimaModel {
    fn order(&self) -> ArimaOrder {
        self.spec.order
    }

    fn seasonal_order(&self) -> SeasonalOrder {
        self.spec.seasonal_order
    }

    fn forecast(&self, steps: usize, alpha: f64) -> Result<ForecastBands> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(FitError::InvalidParameter {
                name: "alpha".to_string(),
                reason: format!("must lie in (0, 1), got {}", alpha),
            });
        }
        if steps == 0 {
            return Ok(ForecastBands::degenerate(Vec::new()));
        }

        let c = &self.coefficients;
        let m = self.spec.period();
        let arma_ar = ar_polynomial(&c.phi, &c.seasonal_phi, m);
        let integrated = multiply(
            &arma_ar,
            &differencing_polynomial(self.spec.order.d, self.spec.seasonal_order.d, m),
        );
        let ar = autoregressive_weights(&integrated);
        let ma_poly = ma_polynomial(&c.theta, &c.seasonal_theta, m);
        let ma = &ma_poly[1..];

        let constant = if self.spec.include_mean {
            c.mean * arma_ar.iter().sum::<f64>()
        } else {
            0.0
        };

        let n = self.history.len();
        let mut path = self.history.clone();
        path.reserve(steps);
        for h in 0..steps {
            let t = n + h;
            let mut value = constant;
            for (i, a) in ar.iter().enumerate() {
                let lag = i + 1;
                if t >= lag {
                    value += a * path[t - lag];
                }
            }
            // Only innovations already observed contribute; future ones are zero
            for (j, b) in ma.iter().enumerate() {
                let lag = j + 1;
                if lag > h && t >= lag {
                    value += b * self.innovations[t - lag];
                }
            }
            path.push(value);
        }
        let mean = path.split_off(n);

        let normal = Normal::new(0.0, 1.0).map_err(|e| FitError::Optimizer(e.to_string()))?;
        let z = normal.inverse_cdf(1.0 - alpha / 2.0);
        let psi = Self::psi_weights(&ar, ma, steps);

        let mut cumulative = 0.0;
        let mut lower = Vec::with_capacity(steps);
        let mut upper = Vec::with_capacity(steps);
        for (h, point) in mean.iter().enumerate() {
            cumulative += psi[h] * psi[h];
            let half_width = z * (self.sigma2 * cumulative).sqrt();
            lower.push(point - half_width);
            upper.push(point + half_width);
        }

        Ok(ForecastBands { mean, lower, upper })
    }

    fn aic(&self) -> f64 {
        self.aic
    }

    fn bic(&self) -> f64 {
        self.bic
    }

    fn aicc(&self) -> Option<f64> {
        self.aicc
    }
}
