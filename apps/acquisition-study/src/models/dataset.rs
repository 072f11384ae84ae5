//! The three aligned input datasets and their structural check.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::company::CompanyRecord;
use crate::error::{Result, StudyError};

/// Monthly prices for one company, aligned to the month header. `None` marks a missing month.
///
/// Rows are shared between the dataset and the filtered subsets without copying.
pub type PriceRow = Arc<[Option<Decimal>]>;

/// Build a price row from a vector of optional prices.
#[must_use]
pub fn price_row(prices: Vec<Option<Decimal>>) -> PriceRow {
    prices.into()
}

/// Company records with their share-price and benchmark-index rows.
///
/// Row `i` of `companies`, `share_prices` and `index_prices` describe the
/// same acquisition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDataset {
    /// Month offsets relative to the announcement (e.g. -5 ..= 29).
    pub months: Vec<i32>,
    /// Company records.
    pub companies: Vec<CompanyRecord>,
    /// Acquirer share prices.
    #[serde(deserialize_with = "deserialize_price_rows")]
    pub share_prices: Vec<PriceRow>,
    /// Benchmark index prices.
    #[serde(deserialize_with = "deserialize_price_rows")]
    pub index_prices: Vec<PriceRow>,
}

/// A price cell as exported: a number, a numeric string, or `""` for a missing month.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceCell {
    Price(Decimal),
    Text(String),
}

fn deserialize_price_rows<'de, D>(deserializer: D) -> std::result::Result<Vec<PriceRow>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<Option<PriceCell>>> = Deserialize::deserialize(deserializer)?;
    rows.into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .map(|cell| match cell {
                    None => Ok(None),
                    Some(PriceCell::Price(price)) => Ok(Some(price)),
                    Some(PriceCell::Text(text)) if text.trim().is_empty() => Ok(None),
                    Some(PriceCell::Text(text)) => {
                        Err(D::Error::custom(format!("invalid price '{text}'")))
                    }
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(price_row)
        })
        .collect()
}

impl StudyDataset {
    /// Number of acquisitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the dataset holds no acquisitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Check that the three datasets are aligned and every row spans the month header.
    pub fn validate(&self) -> Result<()> {
        let companies = self.companies.len();
        let share_prices = self.share_prices.len();
        let index_prices = self.index_prices.len();

        if companies != share_prices || companies != index_prices {
            return Err(StudyError::DatasetLengthMismatch {
                companies,
                share_prices,
                index_prices,
            });
        }

        let expected = self.months.len();
        for (series, rows) in [("share", &self.share_prices), ("index", &self.index_prices)] {
            if let Some((row, prices)) = rows
                .iter()
                .enumerate()
                .find(|(_, prices)| prices.len() != expected)
            {
                return Err(StudyError::RowWidthMismatch {
                    series,
                    row,
                    expected,
                    actual: prices.len(),
                });
            }
        }

        Ok(())
    }

    /// Earliest and latest announcement dates.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.companies.first()?.announced_date;
        Some(
            self.companies
                .iter()
                .fold((first, first), |(min, max), company| {
                    (
                        min.min(company.announced_date),
                        max.max(company.announced_date),
                    )
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Buyer, Seller};

    fn company(date: &str) -> CompanyRecord {
        CompanyRecord {
            announced_date: date.parse().unwrap(),
            is_withdrawn: false,
            is_minority_acquisition: false,
            deal_types: Vec::new(),
            transaction_size: None,
            buyer: Buyer {
                identifier: "IQ1".to_string(),
                name: None,
                market_value: Some(dec!(100)),
            },
            seller: Seller {
                identifier: None,
                name: None,
                is_public_company: false,
            },
        }
    }

    fn row(values: &[i64]) -> PriceRow {
        price_row(values.iter().map(|v| Some(Decimal::from(*v))).collect())
    }

    #[test]
    fn test_validate_accepts_aligned_dataset() {
        let dataset = StudyDataset {
            months: vec![-1, 0, 1],
            companies: vec![company("2020-01-01"), company("2021-01-01")],
            share_prices: vec![row(&[1, 2, 3]), row(&[4, 5, 6])],
            index_prices: vec![row(&[7, 8, 9]), row(&[1, 1, 1])],
        };

        assert!(dataset.validate().is_ok());
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let dataset = StudyDataset {
            months: vec![-1, 0, 1],
            companies: vec![company("2020-01-01"), company("2021-01-01")],
            share_prices: vec![row(&[1, 2, 3])],
            index_prices: vec![row(&[7, 8, 9]), row(&[1, 1, 1])],
        };

        assert!(matches!(
            dataset.validate(),
            Err(StudyError::DatasetLengthMismatch {
                companies: 2,
                share_prices: 1,
                index_prices: 2
            })
        ));
    }

    #[test]
    fn test_validate_rejects_short_row() {
        let dataset = StudyDataset {
            months: vec![-1, 0, 1],
            companies: vec![company("2020-01-01")],
            share_prices: vec![row(&[1, 2, 3])],
            index_prices: vec![row(&[7, 8])],
        };

        assert!(matches!(
            dataset.validate(),
            Err(StudyError::RowWidthMismatch {
                series: "index",
                row: 0,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_date_span() {
        let dataset = StudyDataset {
            companies: vec![
                company("2012-12-27"),
                company("2006-09-18"),
                company("2021-08-10"),
            ],
            ..Default::default()
        };

        let Some((first, last)) = dataset.date_span() else {
            panic!("non-empty dataset should have a date span");
        };
        assert_eq!(first.to_string(), "2006-09-18");
        assert_eq!(last.to_string(), "2021-08-10");
        assert!(StudyDataset::default().date_span().is_none());
    }
}
