//! Time series model

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result, ValidationReason};

/// A single timestamped observation; missing values are `NaN`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or an RFC 3339 timestamp
///
/// Offsets are normalized to UTC.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(timestamp);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.naive_utc())
        .map_err(|_| ForecastError::invalid_parameter("date", format!("unrecognized date '{}'", raw)))
}

/// Timestamp-ordered series with unique timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build from observations in any order
    ///
    /// Observations are sorted by timestamp; duplicates are rejected.
    pub fn from_observations(mut observations: Vec<Observation>) -> Result<Self> {
        observations.sort_by_key(|o| o.timestamp);
        if observations
            .windows(2)
            .any(|pair| pair[0].timestamp == pair[1].timestamp)
        {
            return Err(ForecastError::validation(ValidationReason::DuplicateTimestamp));
        }
        let (timestamps, values) = observations
            .into_iter()
            .map(|o| (o.timestamp, o.value))
            .unzip();
        Ok(Self { timestamps, values })
    }

    /// Daily series starting at the Unix epoch
    pub fn from_values(values: Vec<f64>) -> Self {
        let start = NaiveDateTime::default();
        let timestamps = (0..values.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        Self { timestamps, values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Split into the first `len - tail` and the last `tail` observations
    pub fn split_tail(&self, tail: usize) -> (TimeSeries, TimeSeries) {
        let cut = self.len().saturating_sub(tail);
        let head = TimeSeries {
            timestamps: self.timestamps[..cut].to_vec(),
            values: self.values[..cut].to_vec(),
        };
        let rest = TimeSeries {
            timestamps: self.timestamps[cut..].to_vec(),
            values: self.values[cut..].to_vec(),
        };
        (head, rest)
    }

    /// Mean of the non-missing values, 0 for an empty series
    pub fn mean(&self) -> f64 {
        let finite: Vec<f64> = self.values.iter().copied().filter(|v| !v.is_nan()).collect();
        if finite.is_empty() {
            0.0
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        }
    }
}
