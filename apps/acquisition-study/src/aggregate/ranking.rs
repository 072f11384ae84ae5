//! Top-N rankings over abnormal since-announcement returns.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::series::ReturnResult;
use crate::error::StudyError;

/// Ranking metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankMetric {
    /// Final since-announcement value (zero when missing).
    LastMonthSinceAnnouncement,
    /// Most negative since-announcement value.
    Drawdown,
    /// Most positive since-announcement value.
    Peak,
}

impl RankMetric {
    /// Metric value of a result.
    #[must_use]
    pub fn value(&self, result: &ReturnResult) -> Decimal {
        match self {
            Self::LastMonthSinceAnnouncement => result
                .abnormal
                .final_since_announcement()
                .unwrap_or(Decimal::ZERO),
            Self::Drawdown => result.abnormal.drawdown(),
            Self::Peak => result.abnormal.peak(),
        }
    }
}

impl FromStr for RankMetric {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lastMonthSinceAnnouncement" | "lastMonthSinceAcquisition" => {
                Ok(Self::LastMonthSinceAnnouncement)
            }
            "drawdown" => Ok(Self::Drawdown),
            "peak" => Ok(Self::Peak),
            other => Err(StudyError::InvalidMetric(other.to_string())),
        }
    }
}

/// The first `count` results ordered by `metric`.
///
/// Sorting is stable, so ties keep their input order.
#[must_use]
pub fn top_returns<'a, I>(
    results: I,
    count: usize,
    metric: RankMetric,
    ascending: bool,
) -> Vec<ReturnResult>
where
    I: IntoIterator<Item = &'a ReturnResult>,
{
    let mut keyed: Vec<(Decimal, &ReturnResult)> = results
        .into_iter()
        .map(|result| (metric.value(result), result))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering: Ordering = a.cmp(b);
        if ascending { ordering } else { ordering.reverse() }
    });

    keyed
        .into_iter()
        .take(count)
        .map(|(_, result)| result.clone())
        .collect()
}
