//! Stage 1: per filter tuple, select the matching price rows.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::filters::{FilterPredicate, FilterTuple};
use crate::models::{PriceRow, StudyDataset};
use crate::parallel::WorkDistributor;

/// Price rows of the companies matching one filter tuple.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredPrices {
    /// Originating filter tuple.
    pub filters: FilterTuple,
    /// Share-price rows of the matching companies.
    pub share_prices: Vec<PriceRow>,
    /// Index-price rows of the matching companies, aligned with `share_prices`.
    pub index_prices: Vec<PriceRow>,
    /// Number of matching companies.
    pub match_count: usize,
}

/// Read-only payload shared by every filtering worker.
#[derive(Debug)]
pub struct FilteringStage<'a> {
    dataset: &'a StudyDataset,
    predicate: &'a FilterPredicate,
}

impl<'a> FilteringStage<'a> {
    /// Create the stage over a validated dataset.
    #[must_use]
    pub const fn new(dataset: &'a StudyDataset, predicate: &'a FilterPredicate) -> Self {
        Self { dataset, predicate }
    }

    /// Select the rows matching `filters` in a single pass over the dataset.
    ///
    /// Returns `None` when no company matches.
    ///
    /// # Errors
    ///
    /// Propagates predicate failures (upstream invariant violations).
    pub fn filter(&self, filters: &FilterTuple) -> Result<Option<FilteredPrices>> {
        let mut matches = Vec::new();
        for (row, company) in self.dataset.companies.iter().enumerate() {
            if self.predicate.evaluate(filters, company)? {
                matches.push(row);
            }
        }

        if matches.is_empty() {
            return Ok(None);
        }

        let share_prices = matches
            .iter()
            .map(|&row| PriceRow::clone(&self.dataset.share_prices[row]))
            .collect();
        let index_prices = matches
            .iter()
            .map(|&row| PriceRow::clone(&self.dataset.index_prices[row]))
            .collect();

        Ok(Some(FilteredPrices {
            filters: *filters,
            share_prices,
            index_prices,
            match_count: matches.len(),
        }))
    }

    /// Run the stage over every filter tuple.
    ///
    /// Tuples without matches are dropped.
    ///
    /// # Errors
    ///
    /// Fails as a whole on the first predicate failure.
    pub fn run(
        &self,
        distributor: &WorkDistributor,
        tuples: &[FilterTuple],
    ) -> Result<Vec<FilteredPrices>> {
        let samples = distributor.run_chunked("filtering", tuples, self, |filters, stage| {
            stage.filter(filters)
        })?;

        info!(
            "Filtering kept {} of {} filter combinations",
            samples.len(),
            tuples.len()
        );

        Ok(samples)
    }
}
