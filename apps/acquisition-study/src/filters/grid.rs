//! Filter combination grid.

use serde::{Deserialize, Serialize};

use super::dimensions::{
    AcquirerMarketCap, AcquisitionStatus, AcquisitionType, AcquisitionsNumber, DateRange,
    DealTypeFilter, FilterDimension, PublicOrPrivate, TransactionSize,
};
use super::tuple::FilterTuple;

/// The option lists enumerated for each filter dimension.
///
/// Every list always contains the dimension's `All` sentinel, so the
/// product always contains exactly one baseline tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    date_ranges: Vec<DateRange>,
    deal_types: Vec<DealTypeFilter>,
    statuses: Vec<AcquisitionStatus>,
    sizes: Vec<TransactionSize>,
    public_or_private: Vec<PublicOrPrivate>,
    acquisitions_numbers: Vec<AcquisitionsNumber>,
    market_caps: Vec<AcquirerMarketCap>,
    acquisition_types: Vec<AcquisitionType>,
}

impl Default for FilterOptions {
    /// Every value of every dimension.
    fn default() -> Self {
        Self {
            date_ranges: DateRange::VALUES.to_vec(),
            deal_types: DealTypeFilter::VALUES.to_vec(),
            statuses: AcquisitionStatus::VALUES.to_vec(),
            sizes: TransactionSize::VALUES.to_vec(),
            public_or_private: PublicOrPrivate::VALUES.to_vec(),
            acquisitions_numbers: AcquisitionsNumber::VALUES.to_vec(),
            market_caps: AcquirerMarketCap::VALUES.to_vec(),
            acquisition_types: AcquisitionType::VALUES.to_vec(),
        }
    }
}

impl FilterOptions {
    /// Create a builder that starts with only the `All` sentinels.
    #[must_use]
    pub fn builder() -> FilterOptionsBuilder {
        FilterOptionsBuilder::new()
    }

    /// Get the total number of filter combinations.
    #[must_use]
    pub fn total_combinations(&self) -> usize {
        [
            self.date_ranges.len(),
            self.deal_types.len(),
            self.statuses.len(),
            self.sizes.len(),
            self.public_or_private.len(),
            self.acquisitions_numbers.len(),
            self.market_caps.len(),
            self.acquisition_types.len(),
        ]
        .into_iter()
        .product()
    }

    /// Generate every filter combination.
    ///
    /// The order is the nested product in dimension order (date range
    /// outermost, acquisition type innermost) and is stable across runs.
    #[must_use]
    pub fn combinations(&self) -> Vec<FilterTuple> {
        let mut result = Vec::with_capacity(self.total_combinations());

        for &date_range in &self.date_ranges {
            for &deal_type in &self.deal_types {
                for &status in &self.statuses {
                    for &size_by_transaction_value in &self.sizes {
                        for &public_or_private in &self.public_or_private {
                            for &acquisitions_number in &self.acquisitions_numbers {
                                for &acquirer_market_cap in &self.market_caps {
                                    for &acquisition_type in &self.acquisition_types {
                                        result.push(FilterTuple {
                                            date_range,
                                            deal_type,
                                            status,
                                            size_by_transaction_value,
                                            public_or_private,
                                            acquisitions_number,
                                            acquirer_market_cap,
                                            acquisition_type,
                                        });
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        result
    }
}

/// Builder for filter options.
///
/// Each setter replaces the option list of one dimension; the `All`
/// sentinel is kept in front and duplicates are dropped.
#[derive(Debug)]
pub struct FilterOptionsBuilder {
    options: FilterOptions,
}

impl Default for FilterOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Prepend the sentinel and drop duplicates, preserving first occurrence.
fn with_all<D: FilterDimension>(values: impl IntoIterator<Item = D>) -> Vec<D> {
    let mut result: Vec<D> = Vec::new();
    for value in D::VALUES
        .iter()
        .copied()
        .filter(D::is_all)
        .chain(values)
    {
        if !result.contains(&value) {
            result.push(value);
        }
    }
    result
}

impl FilterOptionsBuilder {
    /// Create a builder with only the `All` sentinels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: FilterOptions {
                date_ranges: with_all([]),
                deal_types: with_all([]),
                statuses: with_all([]),
                sizes: with_all([]),
                public_or_private: with_all([]),
                acquisitions_numbers: with_all([]),
                market_caps: with_all([]),
                acquisition_types: with_all([]),
            },
        }
    }

    /// Set date range options.
    #[must_use]
    pub fn date_ranges(mut self, values: impl IntoIterator<Item = DateRange>) -> Self {
        self.options.date_ranges = with_all(values);
        self
    }

    /// Set deal type options.
    #[must_use]
    pub fn deal_types(mut self, values: impl IntoIterator<Item = DealTypeFilter>) -> Self {
        self.options.deal_types = with_all(values);
        self
    }

    /// Set status options.
    #[must_use]
    pub fn statuses(mut self, values: impl IntoIterator<Item = AcquisitionStatus>) -> Self {
        self.options.statuses = with_all(values);
        self
    }

    /// Set transaction size options.
    #[must_use]
    pub fn sizes(mut self, values: impl IntoIterator<Item = TransactionSize>) -> Self {
        self.options.sizes = with_all(values);
        self
    }

    /// Set public/private options.
    #[must_use]
    pub fn public_or_private(mut self, values: impl IntoIterator<Item = PublicOrPrivate>) -> Self {
        self.options.public_or_private = with_all(values);
        self
    }

    /// Set acquisitions number options.
    #[must_use]
    pub fn acquisitions_numbers(
        mut self,
        values: impl IntoIterator<Item = AcquisitionsNumber>,
    ) -> Self {
        self.options.acquisitions_numbers = with_all(values);
        self
    }

    /// Set acquirer market cap options.
    #[must_use]
    pub fn market_caps(mut self, values: impl IntoIterator<Item = AcquirerMarketCap>) -> Self {
        self.options.market_caps = with_all(values);
        self
    }

    /// Set majority/minority options.
    #[must_use]
    pub fn acquisition_types(mut self, values: impl IntoIterator<Item = AcquisitionType>) -> Self {
        self.options.acquisition_types = with_all(values);
        self
    }

    /// Build the filter options.
    #[must_use]
    pub fn build(self) -> FilterOptions {
        self.options
    }
}
