//! Filter predicate engine.
//!
//! Decides whether one company row passes one filter tuple. Derived per-row
//! values (the buyer's acquisition count, the size ratio) are only looked up
//! when their dimension is constrained.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::dimensions::FilterDimension;
use super::tuple::FilterTuple;
use crate::error::{Result, StudyError};
use crate::models::CompanyRecord;

/// Number of acquisitions per buyer, computed once from the full dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerTransactionIndex {
    counts: HashMap<String, usize>,
}

impl BuyerTransactionIndex {
    /// Count acquisitions per buyer identifier.
    #[must_use]
    pub fn build(companies: &[CompanyRecord]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for company in companies {
            *counts.entry(company.buyer.identifier.clone()).or_default() += 1;
        }
        Self { counts }
    }

    /// Acquisition count of a buyer.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::UnknownBuyer`] if the buyer was not in the
    /// dataset the index was built from.
    pub fn count(&self, buyer: &str) -> Result<usize> {
        self.counts
            .get(buyer)
            .copied()
            .ok_or_else(|| StudyError::UnknownBuyer {
                buyer: buyer.to_string(),
            })
    }

    /// Number of distinct buyers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Evaluates filter tuples against company rows.
///
/// Holds only read-only derived data, so one predicate is shared by every
/// worker.
#[derive(Debug, Clone)]
pub struct FilterPredicate {
    index: BuyerTransactionIndex,
    today: NaiveDate,
    min_market_cap: Decimal,
}

impl FilterPredicate {
    /// Create a predicate.
    ///
    /// `today` closes the open-ended date ranges; `min_market_cap` is the
    /// floor upstream cleaning guaranteed.
    #[must_use]
    pub const fn new(index: BuyerTransactionIndex, today: NaiveDate, min_market_cap: Decimal) -> Self {
        Self {
            index,
            today,
            min_market_cap,
        }
    }

    /// Decide whether `company` passes every dimension of `filters`.
    ///
    /// # Errors
    ///
    /// A concrete market-cap band reached with a missing or below-floor
    /// market value is an upstream invariant violation and fails with
    /// [`StudyError::MissingMarketValue`] or
    /// [`StudyError::MarketValueBelowFloor`]. An unknown buyer fails with
    /// [`StudyError::UnknownBuyer`] when the acquisition count is
    /// constrained.
    pub fn evaluate(&self, filters: &FilterTuple, company: &CompanyRecord) -> Result<bool> {
        if !filters.acquisition_type.matches(company.is_minority_acquisition)
            || !filters.deal_type.matches(&company.deal_types)
            || !filters.status.matches(company.is_withdrawn)
            || !filters
                .public_or_private
                .matches(company.seller.is_public_company)
            || !filters
                .date_range
                .contains(company.announced_date, self.today)
        {
            return Ok(false);
        }

        let acquisitions = filters.acquisitions_number;
        if !acquisitions.is_all()
            && !acquisitions.matches(self.index.count(&company.buyer.identifier)?)
        {
            return Ok(false);
        }

        let size = filters.size_by_transaction_value;
        if !size.is_all() && !size.matches(company.size_ratio()) {
            return Ok(false);
        }

        self.market_cap_matches(filters, company)
    }

    fn market_cap_matches(&self, filters: &FilterTuple, company: &CompanyRecord) -> Result<bool> {
        let band = filters.acquirer_market_cap;
        if band.band().is_none() {
            return Ok(true);
        }

        let Some(market_value) = company.buyer.market_value else {
            return Err(StudyError::MissingMarketValue {
                buyer: company.buyer.identifier.clone(),
            });
        };
        if market_value < self.min_market_cap {
            return Err(StudyError::MarketValueBelowFloor {
                buyer: company.buyer.identifier.clone(),
                market_value,
                floor: self.min_market_cap,
            });
        }

        Ok(band.matches(market_value))
    }
}
