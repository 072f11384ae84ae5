//! Marginal breakdown: one dimension constrained, every other one `All`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::series::ReturnResult;
use crate::filters::{
    AcquirerMarketCap, AcquisitionStatus, AcquisitionType, AcquisitionsNumber, DateRange,
    DealTypeFilter, FilterDimension, FilterTuple, PublicOrPrivate, TransactionSize,
};

/// Marginal outcome of one concrete dimension value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    /// Dimension value key.
    pub value: String,
    /// Dimension value label.
    pub label: String,
    /// Companies in the sample; 0 when no result exists.
    pub sample_count: usize,
    /// Final abnormal since-announcement return; `None` when no result exists.
    pub final_return: Option<Decimal>,
}

/// Breakdown of one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBreakdown {
    /// Dimension name.
    pub dimension: String,
    /// One entry per concrete value, in enumeration order.
    pub entries: Vec<BreakdownEntry>,
}

fn dimension_breakdown<D: FilterDimension>(
    lookup: &HashMap<FilterTuple, &ReturnResult>,
    with_value: impl Fn(D) -> FilterTuple,
) -> DimensionBreakdown {
    let entries = D::concrete_values()
        .map(|value| {
            let found = lookup.get(&with_value(value));
            BreakdownEntry {
                value: value.key().to_string(),
                label: value.label().to_string(),
                sample_count: found.map_or(0, |result| result.sample_count),
                final_return: found.and_then(|result| result.abnormal.final_since_announcement()),
            }
        })
        .collect();

    DimensionBreakdown {
        dimension: D::NAME.to_string(),
        entries,
    }
}

/// Build the marginal breakdown of every dimension.
///
/// Values without a matching result are reported with a zero count and no
/// return.
#[must_use]
pub fn marginal_breakdown(results: &[ReturnResult]) -> Vec<DimensionBreakdown> {
    let lookup: HashMap<FilterTuple, &ReturnResult> = results
        .iter()
        .filter(|result| result.filters.constrained_dimensions() <= 1)
        .map(|result| (result.filters, result))
        .collect();
    let all = FilterTuple::ALL;

    vec![
        dimension_breakdown(&lookup, |date_range: DateRange| FilterTuple {
            date_range,
            ..all
        }),
        dimension_breakdown(&lookup, |deal_type: DealTypeFilter| FilterTuple {
            deal_type,
            ..all
        }),
        dimension_breakdown(&lookup, |status: AcquisitionStatus| FilterTuple {
            status,
            ..all
        }),
        dimension_breakdown(&lookup, |size_by_transaction_value: TransactionSize| {
            FilterTuple {
                size_by_transaction_value,
                ..all
            }
        }),
        dimension_breakdown(&lookup, |public_or_private: PublicOrPrivate| FilterTuple {
            public_or_private,
            ..all
        }),
        dimension_breakdown(&lookup, |acquisitions_number: AcquisitionsNumber| {
            FilterTuple {
                acquisitions_number,
                ..all
            }
        }),
        dimension_breakdown(&lookup, |acquirer_market_cap: AcquirerMarketCap| {
            FilterTuple {
                acquirer_market_cap,
                ..all
            }
        }),
        dimension_breakdown(&lookup, |acquisition_type: AcquisitionType| FilterTuple {
            acquisition_type,
            ..all
        }),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::aggregate::series::ReturnSeries;
    use crate::returns::MonthlyAverages;

    fn result(filters: FilterTuple, sample_count: usize, last: Decimal) -> ReturnResult {
        ReturnResult {
            filters,
            months: Arc::from(vec![0, 1]),
            sample_count,
            cumulative: ReturnSeries::default(),
            abnormal: ReturnSeries::new(
                MonthlyAverages {
                    averages: vec![Some(Decimal::ZERO), Some(last)],
                    counts: vec![sample_count; 2],
                },
                0,
            ),
        }
    }

    #[test]
    fn test_breakdown_covers_every_dimension() {
        let breakdown = marginal_breakdown(&[]);

        assert_eq!(breakdown.len(), 8);
        assert_eq!(breakdown[0].dimension, "dateRange");
        assert_eq!(breakdown[0].entries.len(), 3);
        assert_eq!(breakdown[1].entries.len(), 16);
        assert!(
            breakdown
                .iter()
                .flat_map(|d| &d.entries)
                .all(|e| e.sample_count == 0 && e.final_return.is_none())
        );
    }

    #[test]
    fn test_breakdown_uses_single_dimension_results_only() {
        let public = FilterTuple {
            public_or_private: PublicOrPrivate::Public,
            ..FilterTuple::ALL
        };
        let public_minority = FilterTuple {
            acquisition_type: AcquisitionType::Minority,
            ..public
        };
        let results = vec![
            result(FilterTuple::ALL, 10, dec!(0.01)),
            result(public, 4, dec!(-0.02)),
            result(public_minority, 1, dec!(0.5)),
        ];

        let breakdown = marginal_breakdown(&results);
        let Some(public_or_private) = breakdown
            .iter()
            .find(|d| d.dimension == "publicOrPrivate")
        else {
            panic!("publicOrPrivate breakdown missing");
        };
        let Some(minority) = breakdown
            .iter()
            .find(|d| d.dimension == "acquisitionType")
            .and_then(|d| d.entries.iter().find(|e| e.value == "minority"))
        else {
            panic!("minority entry missing");
        };

        assert_eq!(public_or_private.entries[0].value, "public");
        assert_eq!(public_or_private.entries[0].sample_count, 4);
        assert_eq!(public_or_private.entries[0].final_return, Some(dec!(-0.02)));
        assert_eq!(public_or_private.entries[1].sample_count, 0);
        assert_eq!(minority.sample_count, 0);
        assert_eq!(minority.final_return, None);
    }
}
