//! Wire representation of series

use forecast_spi::{parse_timestamp, Observation, Result, TimeSeries};
use serde::{Deserialize, Serialize};

/// One `{date, value}` pair; `null` values become missing observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: String,
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value: Some(value),
        }
    }
}

/// Parse dates and build a timestamp-ordered series
pub fn series_from_points(points: &[DataPoint]) -> Result<TimeSeries> {
    let observations = points
        .iter()
        .map(|point| {
            Ok(Observation::new(
                parse_timestamp(&point.date)?,
                point.value.unwrap_or(f64::NAN),
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    TimeSeries::from_observations(observations)
}
