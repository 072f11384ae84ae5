//! Event-study return math.
//!
//! All arithmetic is exact decimal; every published value is rounded
//! half away from zero to [`ROUNDING_SCALE`] places. `None` marks a month
//! without data and propagates through every step.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::constants::{ONE, PRODUCT_SCALE, ROUNDING_SCALE};
use crate::error::{Result, StudyError};

/// A per-month series with gaps.
pub type Series = Vec<Option<Decimal>>;

const fn overflow(operation: &'static str) -> StudyError {
    StudyError::ArithmeticOverflow { operation }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(ROUNDING_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Cross-sectional average per month and the number of contributing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverages {
    /// Average per month; `None` when no row had a value.
    pub averages: Series,
    /// Non-null contributors per month.
    pub counts: Vec<usize>,
}

impl MonthlyAverages {
    /// Number of months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

/// Averaged cumulative returns for one sample of acquisitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCalculation {
    /// Average cumulative share-price return.
    pub cumulative: MonthlyAverages,
    /// Average cumulative abnormal return (share minus index).
    pub abnormal: MonthlyAverages,
}

/// Month-over-month simple returns of one price row.
///
/// The first month has no predecessor and is `None`, as is any month where
/// either price is missing or the previous price is zero.
///
/// # Errors
///
/// [`StudyError::ArithmeticOverflow`] when a ratio leaves the decimal range.
pub fn monthly_returns(prices: &[Option<Decimal>]) -> Result<Series> {
    let mut returns = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return Ok(returns);
    }

    returns.push(None);
    for window in prices.windows(2) {
        let value = match (window[0], window[1]) {
            (Some(previous), Some(current)) if !previous.is_zero() && !current.is_zero() => {
                let change = current
                    .checked_div(previous)
                    .and_then(|ratio| ratio.checked_sub(ONE))
                    .ok_or_else(|| overflow("monthly return"))?;
                Some(round(change))
            }
            _ => None,
        };
        returns.push(value);
    }
    Ok(returns)
}

/// Share return minus index return, month by month.
///
/// # Errors
///
/// [`StudyError::ArithmeticOverflow`] when a difference leaves the decimal range.
pub fn abnormal_returns(share: &[Option<Decimal>], index: &[Option<Decimal>]) -> Result<Series> {
    share
        .iter()
        .zip(index)
        .map(|(share, index)| match (share, index) {
            (Some(share), Some(index)) => share
                .checked_sub(*index)
                .map(|abnormal| Some(round(abnormal)))
                .ok_or_else(|| overflow("abnormal return")),
            _ => Ok(None),
        })
        .collect()
}

/// Compound monthly returns into cumulative returns.
///
/// Missing months stay `None` and leave the running product untouched, so
/// compounding resumes from the last known value.
///
/// # Errors
///
/// [`StudyError::ArithmeticOverflow`] when the running product leaves the
/// decimal range.
pub fn cumulative_returns(returns: &[Option<Decimal>]) -> Result<Series> {
    let mut product = ONE;
    let mut cumulative = Vec::with_capacity(returns.len());

    for value in returns {
        let Some(value) = *value else {
            cumulative.push(None);
            continue;
        };
        product = ONE
            .checked_add(value)
            .and_then(|growth| product.checked_mul(growth))
            .ok_or_else(|| overflow("compounding"))?
            .round_dp(PRODUCT_SCALE);
        let total = product
            .checked_sub(ONE)
            .ok_or_else(|| overflow("compounding"))?;
        cumulative.push(Some(round(total)));
    }

    Ok(cumulative)
}

/// Average each month over the rows that have a value.
///
/// Rows shorter than the widest row count as missing for the tail months.
///
/// # Errors
///
/// [`StudyError::ArithmeticOverflow`] when a monthly sum leaves the decimal
/// range.
pub fn average_by_month<R: AsRef<[Option<Decimal>]>>(rows: &[R]) -> Result<MonthlyAverages> {
    let width = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
    let mut averages = Vec::with_capacity(width);
    let mut counts = Vec::with_capacity(width);

    for month in 0..width {
        let (sum, count) = rows
            .iter()
            .filter_map(|row| row.as_ref().get(month).copied().flatten())
            .try_fold((Decimal::ZERO, 0_usize), |(sum, count), value| {
                sum.checked_add(value).map(|sum| (sum, count + 1))
            })
            .ok_or_else(|| overflow("monthly average"))?;

        let average = if count == 0 {
            None
        } else {
            Some(round(sum / Decimal::from(count as u64)))
        };
        averages.push(average);
        counts.push(count);
    }

    Ok(MonthlyAverages { averages, counts })
}

/// Run the full calculation for one sample.
///
/// Per row: monthly returns of the share and of the index, abnormal
/// returns, then compounding. The cumulative rows are then averaged per
/// month. An empty sample yields empty series.
///
/// # Errors
///
/// [`StudyError::ArithmeticOverflow`] when any step leaves the decimal
/// range. Extreme but non-null prices can do this; the sample is then
/// rejected rather than silently truncated.
pub fn calculate_returns<R: AsRef<[Option<Decimal>]>>(
    share_prices: &[R],
    index_prices: &[R],
) -> Result<ReturnCalculation> {
    if share_prices.is_empty() || index_prices.is_empty() {
        return Ok(ReturnCalculation::default());
    }

    let mut cumulative = Vec::with_capacity(share_prices.len());
    let mut abnormal = Vec::with_capacity(share_prices.len());

    for (share, index) in share_prices.iter().zip(index_prices) {
        let share_returns = monthly_returns(share.as_ref())?;
        let index_returns = monthly_returns(index.as_ref())?;

        abnormal.push(cumulative_returns(&abnormal_returns(
            &share_returns,
            &index_returns,
        )?)?);
        cumulative.push(cumulative_returns(&share_returns)?);
    }

    Ok(ReturnCalculation {
        cumulative: average_by_month(&cumulative)?,
        abnormal: average_by_month(&abnormal)?,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn some(values: &[Decimal]) -> Series {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_monthly_returns() {
        let prices = some(&[dec!(100), dec!(110), dec!(105), dec!(115)]);

        assert_eq!(
            monthly_returns(&prices).unwrap(),
            vec![
                None,
                Some(dec!(0.1)),
                Some(dec!(-0.0454545455)),
                Some(dec!(0.0952380952)),
            ]
        );
    }

    #[test]
    fn test_monthly_returns_treat_zero_and_missing_as_gaps() {
        let prices = vec![Some(dec!(100)), None, Some(dec!(0)), Some(dec!(50)), Some(dec!(55))];

        assert_eq!(
            monthly_returns(&prices).unwrap(),
            vec![None, None, None, None, Some(dec!(0.1))]
        );
        assert!(monthly_returns(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_abnormal_returns() {
        let share = some(&[dec!(0.1), dec!(0.05), dec!(0.02)]);
        let index = some(&[dec!(0.08), dec!(0.03), dec!(0.01)]);

        assert_eq!(
            abnormal_returns(&share, &index).unwrap(),
            some(&[dec!(0.02), dec!(0.02), dec!(0.01)])
        );
        assert_eq!(
            abnormal_returns(&[None, Some(dec!(0.1))], &[Some(dec!(0.1)), None]).unwrap(),
            vec![None, None]
        );
    }

    #[test]
    fn test_cumulative_returns() {
        let returns = vec![None, Some(dec!(0.1)), Some(dec!(0.05)), Some(dec!(0.02))];

        assert_eq!(
            cumulative_returns(&returns).unwrap(),
            vec![None, Some(dec!(0.1)), Some(dec!(0.155)), Some(dec!(0.1781))]
        );
    }

    #[test]
    fn test_cumulative_returns_compound_ten_months() {
        let returns = vec![Some(dec!(0.01)); 10];

        let cumulative = cumulative_returns(&returns).unwrap();
        let Some(Some(last)) = cumulative.last().copied() else {
            panic!("last month should have a value");
        };

        assert_eq!(last, dec!(0.1046221254));
    }

    #[test]
    fn test_cumulative_returns_skip_gaps() {
        let returns = vec![Some(dec!(0.1)), None, Some(dec!(0.1))];

        assert_eq!(
            cumulative_returns(&returns).unwrap(),
            vec![Some(dec!(0.1)), None, Some(dec!(0.21))]
        );
    }

    #[test]
    fn test_average_by_month() {
        let rows = vec![
            vec![None, Some(dec!(0.1)), Some(dec!(0.05)), Some(dec!(0.02))],
            vec![None, Some(dec!(0.05)), Some(dec!(0.03)), Some(dec!(0.01))],
        ];

        let result = average_by_month(&rows).unwrap();

        assert_eq!(
            result.averages,
            vec![None, Some(dec!(0.075)), Some(dec!(0.04)), Some(dec!(0.015))]
        );
        assert_eq!(result.counts, vec![0, 2, 2, 2]);
    }

    #[test]
    fn test_average_by_month_with_gaps() {
        let rows = vec![
            vec![None, Some(dec!(0.1)), None, Some(dec!(0.02))],
            vec![None, Some(dec!(0.05)), Some(dec!(0.03)), None],
        ];

        let result = average_by_month(&rows).unwrap();

        assert_eq!(
            result.averages,
            vec![None, Some(dec!(0.075)), Some(dec!(0.03)), Some(dec!(0.02))]
        );
        assert_eq!(result.counts, vec![0, 2, 1, 1]);
    }

    #[test]
    fn test_calculate_returns() {
        let share = vec![some(&[dec!(100), dec!(110), dec!(121)])];
        let index = vec![some(&[dec!(1000), dec!(1000), dec!(1100)])];

        let result = calculate_returns(&share, &index).unwrap();

        assert_eq!(
            result.cumulative.averages,
            vec![None, Some(dec!(0.1)), Some(dec!(0.21))]
        );
        // Abnormal: 0.1 - 0 then 0.1 - 0.1
        assert_eq!(
            result.abnormal.averages,
            vec![None, Some(dec!(0.1)), Some(dec!(0.1))]
        );
        assert_eq!(result.abnormal.counts, vec![0, 1, 1]);
    }

    #[test]
    fn test_calculate_returns_empty_sample() {
        let empty: Vec<Series> = Vec::new();

        let result = calculate_returns(&empty, &empty).unwrap();

        assert!(result.cumulative.is_empty());
        assert!(result.abnormal.is_empty());
    }

    #[test]
    fn test_extreme_growth_is_an_error_not_a_panic() {
        let share = vec![some(&[
            dec!(0.000000000000000001),
            dec!(0.000000000001),
            dec!(0.000001),
            dec!(1),
            dec!(1000000),
            dec!(1000000000000),
        ])];
        let index = vec![some(&[dec!(100); 6])];

        let result = std::panic::catch_unwind(|| calculate_returns(&share, &index));

        let Ok(outcome) = result else {
            panic!("return calculation must not panic on extreme prices");
        };
        assert!(matches!(
            outcome,
            Err(StudyError::ArithmeticOverflow { operation: "compounding" })
        ));
    }

    #[test]
    fn test_average_overflow_is_reported() {
        let rows = vec![vec![Some(Decimal::MAX)], vec![Some(Decimal::MAX)]];

        assert!(matches!(
            average_by_month(&rows),
            Err(StudyError::ArithmeticOverflow { operation: "monthly average" })
        ));
    }
}
