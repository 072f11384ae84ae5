//! One point in the filter combination space.

use serde::{Deserialize, Serialize};

use super::dimensions::{
    AcquirerMarketCap, AcquisitionStatus, AcquisitionType, AcquisitionsNumber, DateRange,
    DealTypeFilter, FilterDimension, PublicOrPrivate, TransactionSize,
};

/// One value per filter dimension.
///
/// Tuples are plain data: they are copied into every result so that a
/// result can always be traced back to its originating combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTuple {
    /// Announcement date window.
    pub date_range: DateRange,
    /// Required deal tag.
    pub deal_type: DealTypeFilter,
    /// Completion status.
    pub status: AcquisitionStatus,
    /// Transaction size relative to buyer market value.
    pub size_by_transaction_value: TransactionSize,
    /// Seller listing.
    pub public_or_private: PublicOrPrivate,
    /// Buyer acquisition count bucket.
    pub acquisitions_number: AcquisitionsNumber,
    /// Buyer market value band.
    pub acquirer_market_cap: AcquirerMarketCap,
    /// Majority or minority stake.
    #[serde(rename = "type")]
    pub acquisition_type: AcquisitionType,
}

impl FilterTuple {
    /// The unfiltered baseline: every dimension set to `All`.
    pub const ALL: Self = Self {
        date_range: DateRange::All,
        deal_type: DealTypeFilter::All,
        status: AcquisitionStatus::All,
        size_by_transaction_value: TransactionSize::All,
        public_or_private: PublicOrPrivate::All,
        acquisitions_number: AcquisitionsNumber::All,
        acquirer_market_cap: AcquirerMarketCap::All,
        acquisition_type: AcquisitionType::All,
    };

    /// Whether every dimension is unconstrained.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        *self == Self::ALL
    }

    /// Number of constrained dimensions.
    #[must_use]
    pub fn constrained_dimensions(&self) -> usize {
        [
            self.date_range.is_all(),
            self.deal_type.is_all(),
            self.status.is_all(),
            self.size_by_transaction_value.is_all(),
            self.public_or_private.is_all(),
            self.acquisitions_number.is_all(),
            self.acquirer_market_cap.is_all(),
            self.acquisition_type.is_all(),
        ]
        .into_iter()
        .filter(|is_all| !is_all)
        .count()
    }

    /// Human-readable label, e.g.
    /// `(Public)/(0-2%)/(Majority)/(2-5)/(Cash Deal)/(Completed)/(2016-Today)/(All Market Caps)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "({})/({})/({})/({})/({})/({})/({})/({})",
            self.public_or_private.label(),
            self.size_by_transaction_value.label(),
            self.acquisition_type.label(),
            self.acquisitions_number.label(),
            self.deal_type.label(),
            self.status.label(),
            self.date_range.label(),
            self.acquirer_market_cap.label(),
        )
    }
}

impl Default for FilterTuple {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::fmt::Display for FilterTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DealType;

    #[test]
    fn test_baseline() {
        assert!(FilterTuple::ALL.is_baseline());
        assert!(FilterTuple::default().is_baseline());
        assert_eq!(FilterTuple::ALL.constrained_dimensions(), 0);

        let tuple = FilterTuple {
            status: AcquisitionStatus::Completed,
            ..FilterTuple::ALL
        };
        assert!(!tuple.is_baseline());
        assert_eq!(tuple.constrained_dimensions(), 1);
    }

    #[test]
    fn test_label() {
        let tuple = FilterTuple {
            date_range: DateRange::From2016ToToday,
            deal_type: DealTypeFilter::Only(DealType::CashDeal),
            status: AcquisitionStatus::Completed,
            size_by_transaction_value: TransactionSize::UpTo2Pct,
            public_or_private: PublicOrPrivate::Public,
            acquisitions_number: AcquisitionsNumber::TwoToFive,
            acquirer_market_cap: AcquirerMarketCap::All,
            acquisition_type: AcquisitionType::Majority,
        };

        assert_eq!(
            tuple.label(),
            "(Public)/(0-2%)/(Majority)/(2-5)/(Cash Deal)/(Completed)/(2016-Today)/(All Market Caps)"
        );
    }

    #[test]
    fn test_serializes_with_dimension_keys() {
        let tuple = FilterTuple {
            deal_type: DealTypeFilter::Only(DealType::StockDeal),
            acquisition_type: AcquisitionType::Minority,
            ..FilterTuple::ALL
        };

        let json = match serde_json::to_value(tuple) {
            Ok(v) => v,
            Err(e) => panic!("Serialization failed: {e}"),
        };

        assert_eq!(json["dealType"], "stockDeal");
        assert_eq!(json["type"], "minority");
        assert_eq!(json["sizeByTransactionValue"], "all");

        let back: FilterTuple = match serde_json::from_value(json) {
            Ok(t) => t,
            Err(e) => panic!("Deserialization failed: {e}"),
        };
        assert_eq!(back, tuple);
    }
}
