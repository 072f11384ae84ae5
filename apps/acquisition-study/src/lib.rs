// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Acquisition Study - Event-Study Core
//!
//! Measures acquirer share-price performance around acquisition
//! announcements, sliced across every combination of categorical deal
//! filters.
//!
//! # Pipeline
//!
//! 1. **Generate**: the Cartesian product of the filter dimensions
//!    (`filters::FilterOptions`), always including the all-"all" baseline
//! 2. **Filter** (parallel): per filter tuple, the matching share/index
//!    price rows (`stages::FilteringStage`)
//! 3. **Returns** (parallel): per surviving sample, average cumulative
//!    abnormal returns (`returns`, `stages::run_returns_stage`)
//! 4. **Aggregate**: since-announcement series, Top-N rankings and the
//!    marginal breakdown (`aggregate`)
//!
//! `pipeline::AcquisitionStudy` runs all four. Raw data is prepared with
//! the helpers in `cleaning` first.
//!
//! # Example
//!
//! ```rust,ignore
//! use acquisition_study::prelude::*;
//!
//! let config = load_config(Some("study.yaml"))?;
//! let dataset = prepare_dataset(raw, config.analysis.min_market_cap)?;
//! let output = AcquisitionStudy::new(&config).run(&dataset)?;
//! println!("{}", output.baseline.sample_count);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod aggregate;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod parallel;
pub mod pipeline;
pub mod returns;
pub mod stages;
pub mod telemetry;

pub use error::{Result, StudyError};
pub use pipeline::AcquisitionStudy;

/// Commonly used types.
pub mod prelude {
    pub use crate::aggregate::{RankMetric, ReturnResult, StudyOutput, top_returns};
    pub use crate::cleaning::prepare_dataset;
    pub use crate::config::{StudyConfig, load_config, load_config_from_string};
    pub use crate::error::{Result, StudyError};
    pub use crate::filters::{FilterDimension, FilterOptions, FilterTuple};
    pub use crate::models::{CompanyRecord, DealType, StudyDataset};
    pub use crate::parallel::{ParallelConfig, WorkDistributor};
    pub use crate::pipeline::AcquisitionStudy;
}
