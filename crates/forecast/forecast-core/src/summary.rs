//! Forecast summaries: totals, trend and growth

use forecast_spi::{SummaryResult, Trend, TrendDirection};

/// Words used for the trend direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendVocabulary {
    /// growing / declining
    Demand,
    /// increasing / decreasing
    Revenue,
}

/// Observations averaged for the growth-rate baseline
const RECENT_WINDOW: usize = 3;

/// Derives aggregates from a forecast path
pub struct ResultSummarizer;

impl ResultSummarizer {
    /// Total, average, peak and trend of a forecast
    pub fn summarize(forecast: &[f64], vocabulary: TrendVocabulary) -> SummaryResult {
        let total: f64 = forecast.iter().sum();
        let average = if forecast.is_empty() {
            0.0
        } else {
            total / forecast.len() as f64
        };
        SummaryResult {
            total,
            average,
            peak_index: Self::peak_index(forecast),
            trend: Self::trend(forecast, vocabulary),
            growth_rate: None,
        }
    }

    /// [`summarize`](Self::summarize) plus the growth rate against recent history
    pub fn summarize_with_growth(
        forecast: &[f64],
        history: &[f64],
        vocabulary: TrendVocabulary,
    ) -> SummaryResult {
        SummaryResult {
            growth_rate: Some(Self::growth_rate(forecast, history)),
            ..Self::summarize(forecast, vocabulary)
        }
    }

    /// 1-based index of the first maximum
    pub fn peak_index(forecast: &[f64]) -> Option<usize> {
        forecast
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, current)) if v <= current => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i + 1)
    }

    /// Direction and percentage change from the first to the last value
    pub fn trend(forecast: &[f64], vocabulary: TrendVocabulary) -> Trend {
        let (first, last) = match (forecast.first(), forecast.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (0.0, 0.0),
        };
        let rising = last > first;
        let direction = match (vocabulary, rising) {
            (TrendVocabulary::Demand, true) => TrendDirection::Growing,
            (TrendVocabulary::Demand, false) => TrendDirection::Declining,
            (TrendVocabulary::Revenue, true) => TrendDirection::Increasing,
            (TrendVocabulary::Revenue, false) => TrendDirection::Decreasing,
        };
        let percentage = if first == 0.0 {
            0.0
        } else {
            (last - first) / first * 100.0
        };
        Trend {
            direction,
            percentage,
        }
    }

    /// Forecast mean vs. the mean of the last three observations, in percent
    ///
    /// 0 when fewer than two observations exist or the recent mean is 0.
    pub fn growth_rate(forecast: &[f64], history: &[f64]) -> f64 {
        if history.len() < 2 || forecast.is_empty() {
            return 0.0;
        }
        let recent = &history[history.len().saturating_sub(RECENT_WINDOW)..];
        let recent_avg = recent.iter().sum::<f64>() / recent.len() as f64;
        if recent_avg == 0.0 {
            return 0.0;
        }
        let forecast_avg = forecast.iter().sum::<f64>() / forecast.len() as f64;
        (forecast_avg - recent_avg) / recent_avg * 100.0
    }
}
