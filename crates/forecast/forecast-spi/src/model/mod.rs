//! Model module containing data structures

mod config;
mod evaluation;
mod forecast_result;
mod reorder;
mod summary;
mod time_series;

pub use config::{confidence_alpha, ForecastConfig};
pub use evaluation::{EvaluationMetrics, EvaluationResult};
pub use forecast_result::{BusinessForecast, FitMetrics, ForecastResult, ModelDescriptor};
pub use reorder::{AlertStatus, Priority, ReorderContext, ReorderDecision, UsageWindows};
pub use summary::{SummaryResult, Trend, TrendDirection};
pub use time_series::{parse_timestamp, Observation, TimeSeries};
