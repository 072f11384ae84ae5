//! Result series anchored at the announcement month.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filters::FilterTuple;
use crate::returns::{MonthlyAverages, Series};
use crate::stages::SampleReturns;

/// Value at month `m` minus the value at `anchor`.
///
/// Months before the anchor, and months without a value, are `None`. A
/// missing anchor value leaves the whole series `None`.
#[must_use]
pub fn since_announcement(averages: &[Option<Decimal>], anchor: usize) -> Series {
    let Some(Some(base)) = averages.get(anchor).copied() else {
        return vec![None; averages.len()];
    };

    averages
        .iter()
        .enumerate()
        .map(|(month, value)| {
            if month < anchor {
                None
            } else {
                value.map(|value| value - base)
            }
        })
        .collect()
}

/// One averaged series with its since-announcement variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSeries {
    /// Average cumulative return per month.
    pub averages: Series,
    /// Contributing companies per month.
    pub counts: Vec<usize>,
    /// `averages` re-based at the announcement month.
    pub since_announcement: Series,
}

impl ReturnSeries {
    /// Anchor an averaged series at `anchor`.
    #[must_use]
    pub fn new(monthly: MonthlyAverages, anchor: usize) -> Self {
        let since_announcement = since_announcement(&monthly.averages, anchor);
        Self {
            averages: monthly.averages,
            counts: monthly.counts,
            since_announcement,
        }
    }

    /// Value at the last month since announcement, if any.
    #[must_use]
    pub fn final_since_announcement(&self) -> Option<Decimal> {
        self.since_announcement.last().copied().flatten()
    }

    /// Most negative since-announcement value, floored at zero.
    #[must_use]
    pub fn drawdown(&self) -> Decimal {
        self.since_announcement
            .iter()
            .flatten()
            .copied()
            .fold(Decimal::ZERO, Decimal::min)
    }

    /// Most positive since-announcement value, floored at zero.
    #[must_use]
    pub fn peak(&self) -> Decimal {
        self.since_announcement
            .iter()
            .flatten()
            .copied()
            .fold(Decimal::ZERO, Decimal::max)
    }
}

/// Aggregated outcome of one filter combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnResult {
    /// Originating filter tuple.
    pub filters: FilterTuple,
    /// Month offsets relative to the announcement.
    pub months: Arc<[i32]>,
    /// Companies passing the filter.
    pub sample_count: usize,
    /// Average cumulative share-price return.
    pub cumulative: ReturnSeries,
    /// Average cumulative abnormal return.
    pub abnormal: ReturnSeries,
}

impl ReturnResult {
    /// Build a result from a returns-stage sample.
    #[must_use]
    pub fn from_sample(sample: SampleReturns, months: Arc<[i32]>, anchor: usize) -> Self {
        Self {
            filters: sample.filters,
            months,
            sample_count: sample.match_count,
            cumulative: ReturnSeries::new(sample.returns.cumulative, anchor),
            abnormal: ReturnSeries::new(sample.returns.abnormal, anchor),
        }
    }

    /// Human-readable label of the originating filter tuple.
    #[must_use]
    pub fn label(&self) -> String {
        self.filters.label()
    }
}
