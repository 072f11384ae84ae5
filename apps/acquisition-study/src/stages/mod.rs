//! The two parallel stages: filtering, then returns.
//!
//! Stage 2 starts only after stage 1 has fully completed; the only data
//! crossing between them is the merged list of [`FilteredPrices`].

mod filtering;
mod returns;

pub use filtering::{FilteredPrices, FilteringStage};
pub use returns::{SampleReturns, compute_sample_returns, run_returns_stage};
