//! Study orchestration: validate, generate, filter, compute, aggregate.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Instant;

use tracing::{Level, info, span};

use crate::aggregate::{AggregationSettings, StudyOutput, aggregate};
use crate::config::{AnalysisConfig, StudyConfig};
use crate::error::{Result, StudyError};
use crate::filters::{BuyerTransactionIndex, FilterOptions, FilterPredicate};
use crate::models::StudyDataset;
use crate::parallel::{Progress, WorkDistributor};
use crate::stages::{FilteringStage, run_returns_stage};

/// Runs the event study over a prepared dataset.
///
/// The dataset must already be cleaned (see [`crate::cleaning`]); the run
/// itself only checks structure.
#[derive(Debug, Clone)]
pub struct AcquisitionStudy {
    analysis: AnalysisConfig,
    distributor: WorkDistributor,
    options: FilterOptions,
}

impl AcquisitionStudy {
    /// Create a study over the full filter grid.
    #[must_use]
    pub fn new(config: &StudyConfig) -> Self {
        Self {
            analysis: config.analysis.clone(),
            distributor: WorkDistributor::new(config.parallel.clone()),
            options: FilterOptions::default(),
        }
    }

    /// Restrict the filter grid.
    #[must_use]
    pub fn with_filter_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// Forward per-task progress of both stages to `listener`.
    #[must_use]
    pub fn with_progress_listener(mut self, listener: Sender<Progress>) -> Self {
        self.distributor = self.distributor.with_progress_listener(listener);
        self
    }

    /// Aggregation parameters derived from the analysis configuration.
    #[must_use]
    pub const fn aggregation_settings(&self) -> AggregationSettings {
        AggregationSettings {
            min_sample_size: self.analysis.min_sample_size,
            top_count: self.analysis.top_count,
            announcement_index: self.analysis.announcement_index,
        }
    }

    /// Run the study.
    ///
    /// # Errors
    ///
    /// Structural problems (misaligned datasets, an empty dataset, an
    /// announcement index outside the price window, a missing baseline) and
    /// upstream invariant violations reported by either stage abort the run.
    pub fn run(&self, dataset: &StudyDataset) -> Result<StudyOutput> {
        let _span = span!(Level::INFO, "acquisition_study", companies = dataset.len()).entered();
        let start_time = Instant::now();

        dataset.validate()?;
        let width = dataset.months.len();
        if self.analysis.announcement_index >= width {
            return Err(StudyError::AnnouncementIndexOutOfRange {
                index: self.analysis.announcement_index,
                width,
            });
        }

        let Some((first, last)) = dataset.date_span() else {
            return Err(StudyError::EmptyDataset);
        };
        info!(
            "Analysing {} acquisitions announced {} to {} over {} months",
            dataset.len(),
            first,
            last,
            width
        );

        let index = BuyerTransactionIndex::build(&dataset.companies);
        info!("Indexed {} distinct buyers", index.len());
        let predicate = FilterPredicate::new(
            index,
            self.analysis.today(),
            self.analysis.min_market_cap,
        );

        let tuples = self.options.combinations();
        info!("Generated {} filter combinations", tuples.len());

        let samples = FilteringStage::new(dataset, &predicate).run(&self.distributor, &tuples)?;
        let returns = run_returns_stage(&self.distributor, samples)?;

        let months: Arc<[i32]> = Arc::from(dataset.months.as_slice());
        let output = aggregate(returns, &months, &self.aggregation_settings())?;

        info!(
            "Study complete: {} results in {:.2}s",
            output.all_results.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(output)
    }
}
