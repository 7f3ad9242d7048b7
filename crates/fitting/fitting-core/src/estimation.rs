//! Conditional-sum-of-squares estimation
//!
//! The ARMA part of a SARIMA model is estimated on the differenced series by
//! minimizing the concentrated CSS objective `n/2 · ln(SSR / n)` with a
//! Nelder-Mead simplex.

use argmin::core::{CostFunction, Error as ArgminError, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use fitting_spi::{ArimaOrder, FitError, Result, SeasonalOrder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::polynomial::{
    ar_polynomial, autoregressive_weights, constrain_invertible, constrain_stationary,
    ma_polynomial,
};

/// Objective value returned for parameter vectors that blow up
const PENALTY: f64 = 1e12;

/// Whether estimated coefficients are kept inside the stationary/invertible region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Reparameterize through partial autocorrelations
    Enforced,
    /// Optimize raw coefficients
    Relaxed,
}

/// Orders of a model to estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub order: ArimaOrder,
    pub seasonal_order: SeasonalOrder,
    /// Estimate a mean for the differenced series
    pub include_mean: bool,
}

impl ModelSpec {
    pub fn new(order: ArimaOrder, seasonal_order: SeasonalOrder, include_mean: bool) -> Self {
        Self {
            order,
            seasonal_order,
            include_mean,
        }
    }

    /// Seasonal period, 1 when the seasonal order is inactive
    pub fn period(&self) -> usize {
        if self.seasonal_order.m > 1 {
            self.seasonal_order.m
        } else {
            1
        }
    }

    fn seasonal_ar(&self) -> usize {
        if self.period() > 1 {
            self.seasonal_order.p
        } else {
            0
        }
    }

    fn seasonal_ma(&self) -> usize {
        if self.period() > 1 {
            self.seasonal_order.q
        } else {
            0
        }
    }

    /// Number of free parameters besides the innovation variance
    pub fn n_params(&self) -> usize {
        self.order.p
            + self.order.q
            + self.seasonal_ar()
            + self.seasonal_ma()
            + usize::from(self.include_mean)
    }

    /// Highest AR lag of the expanded operator
    pub fn ar_span(&self) -> usize {
        self.order.p + self.seasonal_ar() * self.period()
    }

    /// Observations consumed by differencing
    pub fn differencing_span(&self) -> usize {
        self.order.d + self.seasonal_order.differencing_span()
    }
}

/// Estimated ARMA coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    pub phi: Vec<f64>,
    pub seasonal_phi: Vec<f64>,
    pub theta: Vec<f64>,
    pub seasonal_theta: Vec<f64>,
    /// Mean of the differenced series (0 when not estimated)
    pub mean: f64,
}

/// CSS residuals of the differenced series
///
/// Residuals before the first full AR window are zero. Returns the residuals
/// and the index of the first conditioned observation.
pub fn css_residuals(w: &[f64], coefficients: &Coefficients, m: usize) -> (Vec<f64>, usize) {
    let ar = autoregressive_weights(&ar_polynomial(
        &coefficients.phi,
        &coefficients.seasonal_phi,
        m,
    ));
    let ma_poly = ma_polynomial(&coefficients.theta, &coefficients.seasonal_theta, m);
    let ma = &ma_poly[1..];
    let start = ar.len().min(w.len());
    let mu = coefficients.mean;

    let mut residuals = vec![0.0; w.len()];
    for t in start..w.len() {
        let mut e = w[t] - mu;
        for (i, a) in ar.iter().enumerate() {
            e -= a * (w[t - i - 1] - mu);
        }
        for (j, b) in ma.iter().enumerate() {
            let lag = j + 1;
            if t >= start + lag {
                e -= b * residuals[t - lag];
            }
        }
        residuals[t] = e;
    }
    (residuals, start)
}

/// CSS objective over an unconstrained parameter vector
#[derive(Debug, Clone, Copy)]
pub struct CssProblem<'a> {
    w: &'a [f64],
    spec: ModelSpec,
    constraint: Constraint,
    center: f64,
    scale: f64,
}

impl<'a> CssProblem<'a> {
    pub fn new(w: &'a [f64], spec: ModelSpec, constraint: Constraint) -> Self {
        let n = w.len().max(1) as f64;
        let center = w.iter().sum::<f64>() / n;
        let spread = (w.iter().map(|x| (x - center).powi(2)).sum::<f64>() / n).sqrt();
        Self {
            w,
            spec,
            constraint,
            center,
            scale: spread.max(1e-8),
        }
    }

    /// Decode a parameter vector laid out as `[φ, Φ, θ, Θ, mean]`
    pub fn coefficients(&self, params: &[f64]) -> Coefficients {
        let p = self.spec.order.p;
        let sp = self.spec.seasonal_ar();
        let q = self.spec.order.q;
        let sq = self.spec.seasonal_ma();

        let (phi_raw, rest) = params.split_at(p);
        let (sphi_raw, rest) = rest.split_at(sp);
        let (theta_raw, rest) = rest.split_at(q);
        let (stheta_raw, rest) = rest.split_at(sq);

        let (phi, seasonal_phi, theta, seasonal_theta) = match self.constraint {
            Constraint::Enforced => (
                constrain_stationary(phi_raw),
                constrain_stationary(sphi_raw),
                constrain_invertible(theta_raw),
                constrain_invertible(stheta_raw),
            ),
            Constraint::Relaxed => (
                phi_raw.to_vec(),
                sphi_raw.to_vec(),
                theta_raw.to_vec(),
                stheta_raw.to_vec(),
            ),
        };

        let mean = match (self.spec.include_mean, rest.first()) {
            (true, Some(offset)) => self.center + self.scale * offset,
            _ => 0.0,
        };

        Coefficients {
            phi,
            seasonal_phi,
            theta,
            seasonal_theta,
            mean,
        }
    }

    /// Sum of squared residuals and the number of residuals it covers
    pub fn sum_of_squares(&self, coefficients: &Coefficients) -> (f64, usize) {
        let (residuals, start) = css_residuals(self.w, coefficients, self.spec.period());
        let ssr = residuals[start..].iter().map(|e| e * e).sum();
        (ssr, self.w.len() - start)
    }
}

impl CostFunction for CssProblem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> std::result::Result<Self::Output, ArgminError> {
        let (ssr, n_eff) = self.sum_of_squares(&self.coefficients(params));
        if n_eff == 0 || !ssr.is_finite() {
            return Ok(PENALTY);
        }
        let value = 0.5 * n_eff as f64 * (ssr / n_eff as f64).max(f64::MIN_POSITIVE).ln();
        Ok(if value.is_finite() { value.min(PENALTY) } else { PENALTY })
    }
}

/// Optimizer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationOptions {
    /// Iteration cap of the simplex search
    pub max_iters: u64,
    /// Stop once the simplex cost spread falls below this
    pub sd_tolerance: f64,
    /// Seed for the initial simplex jitter
    pub seed: u64,
}

impl Default for EstimationOptions {
    fn default() -> Self {
        Self {
            max_iters: 1_000,
            sd_tolerance: 1e-9,
            seed: 42,
        }
    }
}

/// Result of a CSS fit on the differenced series
#[derive(Debug, Clone)]
pub struct Estimate {
    pub coefficients: Coefficients,
    /// Residuals aligned with the differenced series
    pub residuals: Vec<f64>,
    pub sigma2: f64,
    pub log_likelihood: f64,
    /// Residuals entering the likelihood
    pub n_eff: usize,
    pub iterations: u64,
}

fn initial_simplex(dim: usize, constraint: Constraint, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = match constraint {
        Constraint::Enforced => 0.5,
        Constraint::Relaxed => 0.2,
    };
    let origin = vec![0.0; dim];
    let mut vertices = Vec::with_capacity(dim + 1);
    vertices.push(origin.clone());
    for i in 0..dim {
        let mut vertex = origin.clone();
        vertex[i] += step * (1.0 + 0.1 * rng.gen_range(-1.0..1.0));
        vertices.push(vertex);
    }
    vertices
}

/// Estimate ARMA coefficients on an already differenced series
pub fn estimate(
    w: &[f64],
    spec: ModelSpec,
    constraint: Constraint,
    options: &EstimationOptions,
) -> Result<Estimate> {
    let required = spec.ar_span() + spec.n_params() + 2;
    if w.len() < required {
        return Err(FitError::InsufficientData {
            required: required + spec.differencing_span(),
            actual: w.len() + spec.differencing_span(),
        });
    }

    let problem = CssProblem::new(w, spec, constraint);
    let dim = spec.n_params();

    let (params, iterations) = if dim == 0 {
        (Vec::new(), 0)
    } else {
        let solver = NelderMead::new(initial_simplex(dim, constraint, options.seed))
            .with_sd_tolerance(options.sd_tolerance)
            .map_err(|e| FitError::Optimizer(e.to_string()))?;
        let result = Executor::new(problem, solver)
            .configure(|state| state.max_iters(options.max_iters))
            .run()
            .map_err(|e| FitError::Optimizer(e.to_string()))?;

        let state = result.state();
        if matches!(
            state.get_termination_status(),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        ) {
            tracing::debug!(
                order = %spec.order,
                seasonal_order = %spec.seasonal_order,
                "simplex search stopped at the iteration cap"
            );
        }
        if !state.get_best_cost().is_finite() || state.get_best_cost() >= PENALTY {
            return Err(FitError::convergence("objective is not finite at the optimum"));
        }
        let best = state
            .get_best_param()
            .cloned()
            .ok_or_else(|| FitError::convergence("optimizer returned no parameters"))?;
        (best, state.get_iter())
    };

    let coefficients = problem.coefficients(&params);
    let (residuals, start) = css_residuals(w, &coefficients, spec.period());
    let n_eff = w.len() - start;
    let ssr: f64 = residuals[start..].iter().map(|e| e * e).sum();
    if !ssr.is_finite() {
        return Err(FitError::convergence("residual sum of squares is not finite"));
    }

    let sigma2 = (ssr / n_eff as f64).max(f64::MIN_POSITIVE);
    let log_likelihood =
        -0.5 * n_eff as f64 * ((2.0 * std::f64::consts::PI * sigma2).ln() + 1.0);

    Ok(Estimate {
        coefficients,
        residuals,
        sigma2,
        log_likelihood,
        n_eff,
        iterations,
    })
}
