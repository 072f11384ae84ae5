//! Upstream preparation of raw datasets.
//!
//! The pipeline expects prices without zero sentinels and buyers at or
//! above the market-cap floor. These helpers establish that from raw data.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::Result;
use crate::models::{PriceRow, StudyDataset, price_row};

/// Month-over-month change above which a row is considered corrupt (+1000%).
const MAX_MONTHLY_CHANGE: Decimal = Decimal::TEN;

/// Month-over-month change below which a row is considered corrupt (-100%).
const MIN_MONTHLY_CHANGE: Decimal = Decimal::NEGATIVE_ONE;

/// Drop acquisitions whose buyer market value is missing or below `floor`.
///
/// The three aligned datasets are filtered together. Expects a dataset
/// that passed [`StudyDataset::validate`].
#[must_use]
pub fn retain_min_market_cap(dataset: StudyDataset, floor: Decimal) -> StudyDataset {
    let StudyDataset {
        months,
        companies,
        share_prices,
        index_prices,
    } = dataset;
    let before = companies.len();

    let mut retained = StudyDataset {
        months,
        ..StudyDataset::default()
    };
    for ((company, share), index) in companies.into_iter().zip(share_prices).zip(index_prices) {
        if company.buyer.market_value.is_some_and(|value| value >= floor) {
            retained.companies.push(company);
            retained.share_prices.push(share);
            retained.index_prices.push(index);
        }
    }

    info!(
        "Market cap floor {}: kept {} of {} acquisitions",
        floor,
        retained.len(),
        before
    );
    retained
}

/// Replace zero prices with `None`.
#[must_use]
pub fn nullify_empty_prices(rows: &[PriceRow]) -> Vec<PriceRow> {
    rows.iter()
        .map(|row| {
            if row.iter().flatten().any(Decimal::is_zero) {
                price_row(
                    row.iter()
                        .map(|price| price.filter(|price| !price.is_zero()))
                        .collect(),
                )
            } else {
                PriceRow::clone(row)
            }
        })
        .collect()
}

fn is_implausible(row: &[Option<Decimal>]) -> bool {
    row.windows(2).any(|window| match (window[0], window[1]) {
        (Some(previous), Some(current)) => (current - previous)
            .checked_div(previous)
            .is_some_and(|change| change > MAX_MONTHLY_CHANGE || change < MIN_MONTHLY_CHANGE),
        _ => false,
    })
}

/// Blank out every row containing an implausible monthly move
/// (above +1000% or below -100%).
#[must_use]
pub fn nullify_implausible_rows(rows: &[PriceRow]) -> Vec<PriceRow> {
    rows.iter()
        .map(|row| {
            if is_implausible(row) {
                price_row(vec![None; row.len()])
            } else {
                PriceRow::clone(row)
            }
        })
        .collect()
}

/// Validate a raw dataset and apply every cleaning step.
///
/// # Errors
///
/// Returns the structural error from [`StudyDataset::validate`].
pub fn prepare_dataset(dataset: StudyDataset, floor: Decimal) -> Result<StudyDataset> {
    dataset.validate()?;

    let mut dataset = retain_min_market_cap(dataset, floor);
    dataset.share_prices = nullify_implausible_rows(&nullify_empty_prices(&dataset.share_prices));
    dataset.index_prices = nullify_implausible_rows(&nullify_empty_prices(&dataset.index_prices));

    Ok(dataset)
}
