//! Differencing and differencing-order selection
//!
//! - [`ndiffs`]: non-seasonal order from repeated KPSS level-stationarity tests
//! - [`nsdiffs`]: seasonal order from the seasonal strength of a classical
//!   additive decomposition

/// KPSS critical value at the 5% level (level stationarity)
const KPSS_CRITICAL_5PCT: f64 = 0.463;

/// Seasonal strength above which one seasonal difference is taken
const SEASONAL_STRENGTH_THRESHOLD: f64 = 0.64;

/// Lag-`lag` difference of a series
pub fn difference(data: &[f64], lag: usize) -> Vec<f64> {
    if lag == 0 || data.len() <= lag {
        return if lag == 0 { data.to_vec() } else { Vec::new() };
    }
    data.iter()
        .skip(lag)
        .zip(data.iter())
        .map(|(curr, prev)| curr - prev)
        .collect()
}

/// Apply `(1 - B)^d (1 - B^m)^D` to a series
pub fn apply_differencing(data: &[f64], d: usize, seasonal_d: usize, m: usize) -> Vec<f64> {
    let mut result = data.to_vec();
    if m > 1 {
        for _ in 0..seasonal_d {
            result = difference(&result, m);
        }
    }
    for _ in 0..d {
        result = difference(&result, 1);
    }
    result
}

fn is_constant(data: &[f64]) -> bool {
    match data.first() {
        Some(first) => data.iter().all(|x| (x - first).abs() < 1e-12),
        None => true,
    }
}

/// KPSS statistic for level stationarity
///
/// Uses a Bartlett-weighted Newey-West long-run variance with
/// `⌊3√n / 13⌋` lags. Returns 0 for constant input.
pub fn kpss_statistic(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let mean = data.iter().sum::<f64>() / n as f64;
    let residuals: Vec<f64> = data.iter().map(|x| x - mean).collect();

    let mut partial = 0.0;
    let mut eta = 0.0;
    for e in &residuals {
        partial += e;
        eta += partial * partial;
    }

    let lags = ((3.0 * (n as f64).sqrt()) / 13.0).floor() as usize;
    let mut long_run = residuals.iter().map(|e| e * e).sum::<f64>() / n as f64;
    for s in 1..=lags.min(n - 1) {
        let weight = 1.0 - s as f64 / (lags as f64 + 1.0);
        let autocov: f64 = residuals
            .iter()
            .skip(s)
            .zip(residuals.iter())
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / n as f64;
        long_run += 2.0 * weight * autocov;
    }

    if long_run <= 1e-12 {
        return 0.0;
    }
    eta / ((n * n) as f64 * long_run)
}

/// Number of first differences needed for level stationarity, up to `max_d`
pub fn ndiffs(data: &[f64], max_d: usize) -> usize {
    let mut d = 0;
    let mut current = data.to_vec();
    while d < max_d {
        if current.len() < 3 || is_constant(&current) {
            break;
        }
        if kpss_statistic(&current) <= KPSS_CRITICAL_5PCT {
            break;
        }
        current = difference(&current, 1);
        d += 1;
    }
    d
}

/// Seasonal strength `max(0, 1 - Var(R) / Var(S + R))` of an additive decomposition
///
/// Returns 0 when fewer than two full cycles are available.
pub fn seasonal_strength(data: &[f64], period: usize) -> f64 {
    let n = data.len();
    if period < 2 || n < period * 2 {
        return 0.0;
    }

    // Centered moving average; even periods use the 2 x m filter
    let half = period / 2;
    let mut trend = vec![f64::NAN; n];
    for i in half..(n - half) {
        trend[i] = if period % 2 == 0 {
            let inner: f64 = data[i + 1 - half..i + half].iter().sum();
            (0.5 * data[i - half] + inner + 0.5 * data[i + half]) / period as f64
        } else {
            data[i - half..=i + half].iter().sum::<f64>() / period as f64
        };
    }

    let detrended: Vec<f64> = data
        .iter()
        .zip(trend.iter())
        .map(|(x, t)| x - t)
        .collect();

    let mut seasonal_index = vec![0.0; period];
    for (pos, index) in seasonal_index.iter_mut().enumerate() {
        let values: Vec<f64> = detrended
            .iter()
            .skip(pos)
            .step_by(period)
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if !values.is_empty() {
            *index = values.iter().sum::<f64>() / values.len() as f64;
        }
    }
    let index_mean = seasonal_index.iter().sum::<f64>() / period as f64;
    for index in seasonal_index.iter_mut() {
        *index -= index_mean;
    }

    let mut combined = Vec::new();
    let mut remainder = Vec::new();
    for (i, value) in detrended.iter().enumerate() {
        if value.is_finite() {
            combined.push(*value);
            remainder.push(value - seasonal_index[i % period]);
        }
    }

    let var_combined = variance(&combined);
    if var_combined <= 1e-12 {
        return 0.0;
    }
    (1.0 - variance(&remainder) / var_combined).clamp(0.0, 1.0)
}

/// Number of seasonal differences (0 or up to `max_seasonal_d`)
pub fn nsdiffs(data: &[f64], period: usize, max_seasonal_d: usize) -> usize {
    if max_seasonal_d == 0 || period < 2 || data.len() < period * 2 {
        return 0;
    }
    if seasonal_strength(data, period) > SEASONAL_STRENGTH_THRESHOLD {
        1
    } else {
        0
    }
}

fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (data.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difference() {
        assert_eq!(difference(&[1.0, 3.0, 6.0, 10.0], 1), vec![2.0, 3.0, 4.0]);
        assert_eq!(difference(&[1.0, 3.0, 6.0, 10.0], 2), vec![5.0, 7.0]);
        assert!(difference(&[1.0], 1).is_empty());
    }

    #[test]
    fn test_apply_differencing_lengths() {
        let data: Vec<f64> = (0..30).map(|x| x as f64).collect();
        assert_eq!(apply_differencing(&data, 1, 1, 12).len(), 30 - 1 - 12);
        assert_eq!(apply_differencing(&data, 2, 0, 12).len(), 28);
        // Seasonal differencing is ignored without a period
        assert_eq!(apply_differencing(&data, 0, 1, 1).len(), 30);
    }

    #[test]
    fn test_kpss_trending_series_is_not_stationary() {
        let trend: Vec<f64> = (0..60).map(|x| x as f64 * 2.0).collect();
        assert!(kpss_statistic(&trend) > KPSS_CRITICAL_5PCT);
    }

    #[test]
    fn test_kpss_constant_series() {
        assert_eq!(kpss_statistic(&[5.0; 20]), 0.0);
    }

    #[test]
    fn test_ndiffs_on_trend_and_noise() {
        let trend: Vec<f64> = (0..60).map(|x| 10.0 + x as f64 * 3.0).collect();
        assert_eq!(ndiffs(&trend, 2), 1);

        let oscillating: Vec<f64> = (0..60).map(|x| (x as f64 * 1.7).sin()).collect();
        assert_eq!(ndiffs(&oscillating, 2), 0);
    }

    #[test]
    fn test_ndiffs_respects_max() {
        let quadratic: Vec<f64> = (0..80).map(|x| (x * x) as f64).collect();
        assert!(ndiffs(&quadratic, 1) <= 1);
    }

    #[test]
    fn test_seasonal_strength_of_pure_cycle() {
        let cycle: Vec<f64> = (0..48)
            .map(|i| 100.0 + 20.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
            .collect();
        assert!(seasonal_strength(&cycle, 12) > 0.9);
        assert_eq!(nsdiffs(&cycle, 12, 1), 1);
    }

    #[test]
    fn test_seasonal_strength_needs_two_cycles() {
        let short: Vec<f64> = (0..20).map(|x| x as f64).collect();
        assert_eq!(seasonal_strength(&short, 12), 0.0);
        assert_eq!(nsdiffs(&short, 12, 1), 0);
    }

    #[test]
    fn test_no_seasonality_in_linear_trend() {
        let trend: Vec<f64> = (0..48).map(|x| x as f64).collect();
        assert_eq!(nsdiffs(&trend, 12, 1), 0);
    }
}
