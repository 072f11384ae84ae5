//! Filter Fixture Tests
//!
//! Runs the filtering stage over a small hand-built dataset and checks
//! which acquisitions each filter combination selects.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use test_case::test_case;

use acquisition_study::filters::{
    AcquirerMarketCap, AcquisitionStatus, AcquisitionType, AcquisitionsNumber,
    BuyerTransactionIndex, DateRange, DealTypeFilter, FilterPredicate, FilterTuple,
    PublicOrPrivate, TransactionSize,
};
use acquisition_study::models::{
    Buyer, CompanyRecord, DealType, Seller, StudyDataset, price_row,
};
use acquisition_study::parallel::{ParallelConfig, WorkDistributor};
use acquisition_study::stages::FilteringStage;
use acquisition_study::StudyError;

// =============================================================================
// Fixture
// =============================================================================

struct Deal {
    buyer: &'static str,
    market_value: Decimal,
    public_seller: bool,
    announced: (i32, u32, u32),
    minority: bool,
    withdrawn: bool,
    size: Decimal,
    deal_types: &'static [DealType],
    first_price: i64,
}

const DEALS: [Deal; 5] = [
    Deal {
        buyer: "buyer1",
        market_value: dec!(1000),
        public_seller: true,
        announced: (1995, 1, 1),
        minority: false,
        withdrawn: false,
        size: dec!(100),
        deal_types: &[DealType::CashDeal],
        first_price: 100,
    },
    Deal {
        buyer: "buyer2",
        market_value: dec!(2000),
        public_seller: false,
        announced: (2017, 6, 1),
        minority: true,
        withdrawn: true,
        size: dec!(300),
        deal_types: &[DealType::StockDeal, DealType::CrossBorder],
        first_price: 200,
    },
    Deal {
        buyer: "buyer3",
        market_value: dec!(5000),
        public_seller: true,
        announced: (2020, 1, 1),
        minority: false,
        withdrawn: false,
        size: dec!(1250),
        deal_types: &[DealType::Lbo, DealType::CashDeal],
        first_price: 300,
    },
    Deal {
        buyer: "buyer4",
        market_value: dec!(10000),
        public_seller: false,
        announced: (2023, 6, 1),
        minority: false,
        withdrawn: false,
        size: dec!(6000),
        deal_types: &[DealType::ReverseMerger, DealType::StockDeal],
        first_price: 400,
    },
    Deal {
        buyer: "buyer3",
        market_value: dec!(5500),
        public_seller: true,
        announced: (2023, 6, 1),
        minority: false,
        withdrawn: false,
        size: dec!(50),
        deal_types: &[DealType::BankruptcySale],
        first_price: 350,
    },
];

fn record(deal: &Deal) -> CompanyRecord {
    let (year, month, day) = deal.announced;
    CompanyRecord {
        announced_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        is_withdrawn: deal.withdrawn,
        is_minority_acquisition: deal.minority,
        deal_types: deal.deal_types.to_vec(),
        transaction_size: Some(deal.size),
        buyer: Buyer {
            identifier: deal.buyer.to_string(),
            name: None,
            market_value: Some(deal.market_value),
        },
        seller: Seller {
            identifier: None,
            name: None,
            is_public_company: deal.public_seller,
        },
    }
}

fn fixture() -> StudyDataset {
    StudyDataset {
        months: vec![-1, 0, 1],
        companies: DEALS.iter().map(record).collect(),
        share_prices: DEALS
            .iter()
            .map(|deal| {
                let base = Decimal::from(deal.first_price);
                let step = if deal.first_price == 350 { Decimal::ZERO } else { dec!(10) };
                price_row(vec![Some(base), Some(base + step), Some(base + step + step)])
            })
            .collect(),
        index_prices: DEALS
            .iter()
            .map(|deal| {
                let base = Decimal::from(deal.first_price * 10);
                let step = if deal.first_price == 350 { Decimal::ZERO } else { dec!(100) };
                price_row(vec![Some(base), Some(base + step), Some(base + step + step)])
            })
            .collect(),
    }
}

fn predicate(dataset: &StudyDataset) -> FilterPredicate {
    FilterPredicate::new(
        BuyerTransactionIndex::build(&dataset.companies),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        dec!(10),
    )
}

/// First share price of every selected row, identifying the fixture deals.
fn selected(dataset: &StudyDataset, filters: &FilterTuple) -> Vec<i64> {
    let predicate = predicate(dataset);
    let stage = FilteringStage::new(dataset, &predicate);

    match stage.filter(filters) {
        Ok(Some(sample)) => {
            assert_eq!(sample.match_count, sample.share_prices.len());
            assert_eq!(sample.match_count, sample.index_prices.len());
            sample
                .share_prices
                .iter()
                .map(|row| row[0].and_then(|price| price.to_i64()).unwrap())
                .collect()
        }
        Ok(None) => Vec::new(),
        Err(e) => panic!("filtering failed: {e}"),
    }
}

// =============================================================================
// Single-tuple selection
// =============================================================================

#[test_case(FilterTuple::ALL, &[100, 200, 300, 400, 350] ; "baseline selects everything")]
#[test_case(
    FilterTuple { date_range: DateRange::From2016ToToday, ..FilterTuple::ALL },
    &[200, 300, 400, 350] ; "2016 to today"
)]
#[test_case(
    FilterTuple { acquisition_type: AcquisitionType::Minority, ..FilterTuple::ALL },
    &[200] ; "minority stakes"
)]
#[test_case(
    FilterTuple { status: AcquisitionStatus::WithdrawnTerminated, ..FilterTuple::ALL },
    &[200] ; "withdrawn deals"
)]
#[test_case(
    FilterTuple { public_or_private: PublicOrPrivate::Public, ..FilterTuple::ALL },
    &[100, 300, 350] ; "public sellers"
)]
#[test_case(
    FilterTuple { deal_type: DealTypeFilter::Only(DealType::CashDeal), ..FilterTuple::ALL },
    &[100, 300] ; "cash deals"
)]
#[test_case(
    FilterTuple { size_by_transaction_value: TransactionSize::From10To25Pct, ..FilterTuple::ALL },
    &[100, 200] ; "ten to twenty five percent of market value"
)]
#[test_case(
    FilterTuple {
        date_range: DateRange::From2016ToToday,
        deal_type: DealTypeFilter::Only(DealType::MinorityGainingMajority),
        ..FilterTuple::ALL
    },
    &[] ; "no recent minority gaining majority deals"
)]
#[test_case(
    FilterTuple {
        date_range: DateRange::From2016ToToday,
        deal_type: DealTypeFilter::Only(DealType::StockDeal),
        ..FilterTuple::ALL
    },
    &[200, 400] ; "recent stock deals"
)]
#[test_case(
    FilterTuple {
        acquisition_type: AcquisitionType::Majority,
        public_or_private: PublicOrPrivate::Public,
        ..FilterTuple::ALL
    },
    &[100, 300, 350] ; "majority stakes in public sellers"
)]
#[test_case(
    FilterTuple {
        status: AcquisitionStatus::Completed,
        size_by_transaction_value: TransactionSize::From50To100Pct,
        ..FilterTuple::ALL
    },
    &[400] ; "completed deals worth half the buyer or more"
)]
#[test_case(
    FilterTuple {
        date_range: DateRange::From2016ToToday,
        acquisitions_number: AcquisitionsNumber::TwoToFive,
        ..FilterTuple::ALL
    },
    &[300, 350] ; "recent deals by repeat buyers"
)]
#[test_case(
    FilterTuple { acquirer_market_cap: AcquirerMarketCap::Mid, ..FilterTuple::ALL },
    &[200, 300, 350] ; "mid caps"
)]
#[test_case(
    FilterTuple { acquirer_market_cap: AcquirerMarketCap::Large, ..FilterTuple::ALL },
    &[400] ; "large caps"
)]
fn test_filter_selection(filters: FilterTuple, expected: &[i64]) {
    let dataset = fixture();

    assert_eq!(selected(&dataset, &filters), expected);
}

#[test]
fn test_selected_rows_stay_aligned() {
    let dataset = fixture();
    let predicate = predicate(&dataset);
    let filters = FilterTuple {
        deal_type: DealTypeFilter::Only(DealType::StockDeal),
        ..FilterTuple::ALL
    };

    let Ok(Some(sample)) = FilteringStage::new(&dataset, &predicate).filter(&filters) else {
        panic!("stock deals should match");
    };

    assert_eq!(sample.filters, filters);
    assert_eq!(sample.share_prices[0][0], Some(dec!(200)));
    assert_eq!(sample.index_prices[0][0], Some(dec!(2000)));
    assert_eq!(sample.share_prices[1][0], Some(dec!(400)));
    assert_eq!(sample.index_prices[1][0], Some(dec!(4000)));
}

// =============================================================================
// Stage run
// =============================================================================

#[test]
fn test_stage_drops_empty_combinations() {
    let dataset = fixture();
    let predicate = predicate(&dataset);
    let distributor = WorkDistributor::new(ParallelConfig {
        max_threads: 2,
        track_progress: false,
        min_parallel_tasks: 1,
    });
    let tuples = vec![
        FilterTuple::ALL,
        FilterTuple {
            date_range: DateRange::From2000To2007,
            ..FilterTuple::ALL
        },
        FilterTuple {
            public_or_private: PublicOrPrivate::Private,
            ..FilterTuple::ALL
        },
    ];

    let samples = match FilteringStage::new(&dataset, &predicate).run(&distributor, &tuples) {
        Ok(samples) => samples,
        Err(e) => panic!("filtering stage failed: {e}"),
    };

    assert_eq!(samples.len(), 2);
    let Some(baseline) = samples.iter().find(|sample| sample.filters.is_baseline()) else {
        panic!("baseline should survive filtering");
    };
    assert_eq!(baseline.match_count, 5);
    let Some(private) = samples
        .iter()
        .find(|sample| sample.filters.public_or_private == PublicOrPrivate::Private)
    else {
        panic!("private sellers should survive filtering");
    };
    assert_eq!(private.match_count, 2);
}

#[test]
fn test_missing_market_value_fails_the_stage() {
    let mut dataset = fixture();
    dataset.companies[2].buyer.market_value = None;
    let predicate = predicate(&dataset);
    let distributor = WorkDistributor::new(ParallelConfig::default());
    let tuples = vec![FilterTuple {
        acquirer_market_cap: AcquirerMarketCap::Mid,
        ..FilterTuple::ALL
    }];

    let result = FilteringStage::new(&dataset, &predicate).run(&distributor, &tuples);

    let Err(StudyError::StageFailed { stage, source }) = result else {
        panic!("expected the filtering stage to fail");
    };
    assert_eq!(stage, "filtering");
    assert!(matches!(*source, StudyError::MissingMarketValue { ref buyer } if buyer == "buyer3"));
}
