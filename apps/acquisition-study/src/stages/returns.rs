//! Stage 2: per surviving sample, compute averaged cumulative returns.

use serde::Serialize;

use super::filtering::FilteredPrices;
use crate::error::Result;
use crate::filters::FilterTuple;
use crate::parallel::WorkDistributor;
use crate::returns::{ReturnCalculation, calculate_returns};

/// Averaged return series of one filtered sample. Raw prices are not kept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleReturns {
    /// Originating filter tuple.
    pub filters: FilterTuple,
    /// Averaged cumulative series with per-month counts.
    pub returns: ReturnCalculation,
    /// Number of companies in the sample.
    pub match_count: usize,
}

/// Compute the return series of one sample.
///
/// # Errors
///
/// Returns [`StudyError::ArithmeticOverflow`](crate::error::StudyError::ArithmeticOverflow)
/// when the sample's prices drive a return outside the decimal range.
pub fn compute_sample_returns(sample: &FilteredPrices) -> Result<SampleReturns> {
    Ok(SampleReturns {
        filters: sample.filters,
        returns: calculate_returns(&sample.share_prices, &sample.index_prices)?,
        match_count: sample.match_count,
    })
}

/// Run the returns stage over every filtered sample.
///
/// Consumes the samples so their price rows are released once the stage
/// completes.
///
/// # Errors
///
/// Fails with [`StudyError::StageFailed`](crate::error::StudyError::StageFailed)
/// when any sample overflows, or if the distributor cannot run the stage.
pub fn run_returns_stage(
    distributor: &WorkDistributor,
    samples: Vec<FilteredPrices>,
) -> Result<Vec<SampleReturns>> {
    distributor.run_chunked("returns", &samples, &(), |sample, _| {
        compute_sample_returns(sample).map(Some)
    })
}
