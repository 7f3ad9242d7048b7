//! Point forecast with prediction interval bounds

use serde::{Deserialize, Serialize};

/// Forecast mean with lower/upper interval bounds
///
/// All three vectors have the same length and satisfy
/// `lower[i] <= mean[i] <= upper[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBands {
    /// Point forecast
    pub mean: Vec<f64>,
    /// Lower bound of the prediction interval
    pub lower: Vec<f64>,
    /// Upper bound of the prediction interval
    pub upper: Vec<f64>,
}

impl ForecastBands {
    /// Bands collapsed onto the point forecast
    pub fn degenerate(mean: Vec<f64>) -> Self {
        Self {
            lower: mean.clone(),
            upper: mean.clone(),
            mean,
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_bands() {
        let bands = ForecastBands::degenerate(vec![4.0, 5.0]);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands.lower, bands.mean);
        assert_eq!(bands.upper, bands.mean);
    }

    #[test]
    fn test_empty_bands() {
        let bands = ForecastBands::degenerate(Vec::new());
        assert!(bands.is_empty());
    }
}
