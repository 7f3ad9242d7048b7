//! Model types shared by fitters and their consumers

mod forecast_bands;
mod order;
mod search_bounds;

pub use forecast_bands::ForecastBands;
pub use order::{ArimaOrder, SeasonalOrder};
pub use search_bounds::{AutoFitRequest, SearchBounds};
