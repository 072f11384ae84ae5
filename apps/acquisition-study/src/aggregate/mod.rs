//! Aggregation and ranking of per-combination results.

mod breakdown;
mod ranking;
mod series;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use breakdown::{BreakdownEntry, DimensionBreakdown, marginal_breakdown};
pub use ranking::{RankMetric, top_returns};
pub use series::{ReturnResult, ReturnSeries, since_announcement};

use crate::error::{Result, StudyError};
use crate::returns::format_optional_pct;
use crate::stages::SampleReturns;

/// Parameters of the aggregation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    /// Minimum sample count for a result to be ranked.
    pub min_sample_size: usize,
    /// Length of each Top-N list.
    pub top_count: usize,
    /// Index of the announcement month in the price window.
    pub announcement_index: usize,
}

/// Final output of a study run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyOutput {
    /// The unfiltered result.
    pub baseline: ReturnResult,
    /// Marginal breakdown per dimension.
    pub breakdown: Vec<DimensionBreakdown>,
    /// Lowest final since-announcement returns.
    pub worst_returns_since_announcement: Vec<ReturnResult>,
    /// Highest final since-announcement returns.
    pub best_returns_since_announcement: Vec<ReturnResult>,
    /// Deepest drawdowns.
    pub worst_drawdowns: Vec<ReturnResult>,
    /// Highest peaks.
    pub best_peaks: Vec<ReturnResult>,
    /// Every result, ranked or not.
    pub all_results: Vec<ReturnResult>,
}

/// Locate the single baseline result.
///
/// # Errors
///
/// [`StudyError::MissingBaseline`] when absent,
/// [`StudyError::DuplicateBaseline`] when present more than once.
pub fn find_baseline(results: &[ReturnResult]) -> Result<&ReturnResult> {
    let mut baselines = results.iter().filter(|result| result.filters.is_baseline());
    let baseline = baselines.next().ok_or(StudyError::MissingBaseline)?;

    let extra = baselines.count();
    if extra > 0 {
        return Err(StudyError::DuplicateBaseline { count: extra + 1 });
    }
    Ok(baseline)
}

/// Aggregate returns-stage samples into the study output.
///
/// # Errors
///
/// Fails when the baseline result is missing or duplicated.
pub fn aggregate(
    samples: Vec<SampleReturns>,
    months: &Arc<[i32]>,
    settings: &AggregationSettings,
) -> Result<StudyOutput> {
    let all_results: Vec<ReturnResult> = samples
        .into_iter()
        .map(|sample| {
            ReturnResult::from_sample(sample, Arc::clone(months), settings.announcement_index)
        })
        .collect();

    let baseline = find_baseline(&all_results)?.clone();
    info!(
        "Baseline: {} companies, final abnormal return since announcement {}",
        baseline.sample_count,
        format_optional_pct(baseline.abnormal.final_since_announcement())
    );

    let ranked: Vec<&ReturnResult> = all_results
        .iter()
        .filter(|result| result.sample_count >= settings.min_sample_size)
        .collect();
    info!(
        "Ranking {} of {} results with at least {} companies",
        ranked.len(),
        all_results.len(),
        settings.min_sample_size
    );

    let top = |metric: RankMetric, ascending: bool| {
        top_returns(ranked.iter().copied(), settings.top_count, metric, ascending)
    };

    Ok(StudyOutput {
        breakdown: marginal_breakdown(&all_results),
        worst_returns_since_announcement: top(RankMetric::LastMonthSinceAnnouncement, true),
        best_returns_since_announcement: top(RankMetric::LastMonthSinceAnnouncement, false),
        worst_drawdowns: top(RankMetric::Drawdown, true),
        best_peaks: top(RankMetric::Peak, false),
        baseline,
        all_results,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::filters::{AcquisitionStatus, FilterTuple};
    use crate::returns::{MonthlyAverages, ReturnCalculation};

    fn sample(filters: FilterTuple, match_count: usize, last: Decimal) -> SampleReturns {
        let monthly = MonthlyAverages {
            averages: vec![None, Some(dec!(0.01)), Some(last)],
            counts: vec![0, match_count, match_count],
        };
        SampleReturns {
            filters,
            returns: ReturnCalculation {
                cumulative: monthly.clone(),
                abnormal: monthly,
            },
            match_count,
        }
    }

    fn settings(min_sample_size: usize) -> AggregationSettings {
        AggregationSettings {
            min_sample_size,
            top_count: 30,
            announcement_index: 1,
        }
    }

    fn months() -> Arc<[i32]> {
        Arc::from(vec![-1, 0, 1])
    }

    #[test]
    fn test_missing_baseline_is_fatal() {
        let samples = vec![sample(
            FilterTuple {
                status: AcquisitionStatus::Completed,
                ..FilterTuple::ALL
            },
            5,
            dec!(0.02),
        )];

        assert!(matches!(
            aggregate(samples, &months(), &settings(0)),
            Err(StudyError::MissingBaseline)
        ));
    }

    #[test]
    fn test_duplicate_baseline_is_fatal() {
        let samples = vec![
            sample(FilterTuple::ALL, 5, dec!(0.02)),
            sample(FilterTuple::ALL, 5, dec!(0.02)),
        ];

        assert!(matches!(
            aggregate(samples, &months(), &settings(0)),
            Err(StudyError::DuplicateBaseline { count: 2 })
        ));
    }

    #[test]
    fn test_threshold_excludes_from_rankings_only() {
        let completed = FilterTuple {
            status: AcquisitionStatus::Completed,
            ..FilterTuple::ALL
        };
        let samples = vec![
            sample(FilterTuple::ALL, 10, dec!(0.02)),
            sample(completed, 3, dec!(-0.5)),
        ];

        let output = match aggregate(samples, &months(), &settings(5)) {
            Ok(o) => o,
            Err(e) => panic!("aggregation failed: {e}"),
        };

        assert_eq!(output.all_results.len(), 2);
        assert_eq!(output.worst_returns_since_announcement.len(), 1);
        assert!(output.worst_returns_since_announcement[0].filters.is_baseline());
        assert_eq!(output.baseline.sample_count, 10);
        assert_eq!(
            output.baseline.abnormal.since_announcement,
            vec![None, Some(dec!(0)), Some(dec!(0.01))]
        );
        assert_eq!(output.breakdown.len(), 8);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let samples = vec![sample(FilterTuple::ALL, 5, dec!(0.02))];

        let output = aggregate(samples, &months(), &settings(5)).unwrap();

        assert_eq!(output.best_peaks.len(), 1);
        assert_eq!(output.worst_drawdowns.len(), 1);
    }
}
