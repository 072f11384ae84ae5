//! Return math engine.
//!
//! Turns aligned share/index price rows into averaged cumulative
//! (absolute and abnormal) return series.

mod constants;
mod format;
mod math;

pub use constants::ROUNDING_SCALE;
pub use format::{format_optional_pct, format_pct};
pub use math::{
    MonthlyAverages, ReturnCalculation, Series, abnormal_returns, average_by_month,
    calculate_returns, cumulative_returns, monthly_returns,
};
