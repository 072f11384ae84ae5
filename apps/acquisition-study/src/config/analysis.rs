//! Analysis parameters consumed by the core pipeline.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum number of companies a combination needs to enter the rankings.
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,
    /// Number of entries in each Top-N ranking.
    #[serde(default = "default_top_count")]
    pub top_count: usize,
    /// Minimum buyer market value in millions, as applied upstream.
    #[serde(default = "default_min_market_cap")]
    pub min_market_cap: Decimal,
    /// Position of the announcement month (month 0) in the price window.
    #[serde(default = "default_announcement_index")]
    pub announcement_index: usize,
    /// Upper bound for open-ended date ranges. Defaults to the current UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl AnalysisConfig {
    /// Resolve the "today" bound used by open-ended date ranges.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_sample_size: default_min_sample_size(),
            top_count: default_top_count(),
            min_market_cap: default_min_market_cap(),
            announcement_index: default_announcement_index(),
            today: None,
        }
    }
}

const fn default_min_sample_size() -> usize {
    500
}

const fn default_top_count() -> usize {
    30
}

const fn default_min_market_cap() -> Decimal {
    Decimal::TEN
}

const fn default_announcement_index() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_today_wins() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 31);
        let config = AnalysisConfig {
            today: date,
            ..Default::default()
        };

        assert_eq!(Some(config.today()), date);
    }
}
