//! Lag-operator polynomial helpers
//!
//! Polynomials are coefficient vectors in ascending powers of the backshift
//! operator `B`, with the constant term first.

/// Multiply two lag polynomials
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Spread coefficients onto every `lag`-th power: `1 + c1 B^lag + c2 B^2lag ...`
///
/// `sign` is applied to each coefficient (use `-1.0` for AR operators).
fn lagged(coefficients: &[f64], lag: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coefficients.len() * lag + 1];
    poly[0] = 1.0;
    for (k, &c) in coefficients.iter().enumerate() {
        poly[(k + 1) * lag] = sign * c;
    }
    poly
}

/// Full autoregressive operator `(1 - φ(B)) (1 - Φ(B^m))`
pub fn ar_polynomial(phi: &[f64], seasonal_phi: &[f64], m: usize) -> Vec<f64> {
    let seasonal = if seasonal_phi.is_empty() {
        vec![1.0]
    } else {
        lagged(seasonal_phi, m, -1.0)
    };
    multiply(&lagged(phi, 1, -1.0), &seasonal)
}

/// Full moving-average operator `(1 + θ(B)) (1 + Θ(B^m))`
pub fn ma_polynomial(theta: &[f64], seasonal_theta: &[f64], m: usize) -> Vec<f64> {
    let seasonal = if seasonal_theta.is_empty() {
        vec![1.0]
    } else {
        lagged(seasonal_theta, m, 1.0)
    };
    multiply(&lagged(theta, 1, 1.0), &seasonal)
}

/// Differencing operator `(1 - B)^d (1 - B^m)^D`
pub fn differencing_polynomial(d: usize, seasonal_d: usize, m: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = multiply(&poly, &[1.0, -1.0]);
    }
    if m > 1 {
        for _ in 0..seasonal_d {
            poly = multiply(&poly, &lagged(&[1.0], m, -1.0));
        }
    }
    poly
}

/// Lag weights `a_i` such that the operator reads `1 - a_1 B - a_2 B^2 ...`
pub fn autoregressive_weights(poly: &[f64]) -> Vec<f64> {
    poly.iter().skip(1).map(|c| -c).collect()
}

/// Map unconstrained reals onto stationary AR coefficients
///
/// Each input is squashed into a partial autocorrelation in (-1, 1), then the
/// Durbin-Levinson recursion turns the partials into coefficients whose
/// operator `1 - φ_1 z - ... - φ_p z^p` has all roots outside the unit circle.
pub fn constrain_stationary(unconstrained: &[f64]) -> Vec<f64> {
    let mut phi: Vec<f64> = Vec::with_capacity(unconstrained.len());
    for &x in unconstrained {
        let r = x / (1.0 + x * x).sqrt();
        let previous = phi.clone();
        let k = previous.len();
        for i in 0..k {
            phi[i] = previous[i] - r * previous[k - 1 - i];
        }
        phi.push(r);
    }
    phi
}

/// Map unconstrained reals onto invertible MA coefficients
pub fn constrain_invertible(unconstrained: &[f64]) -> Vec<f64> {
    constrain_stationary(unconstrained)
        .into_iter()
        .map(|c| -c)
        .collect()
}
