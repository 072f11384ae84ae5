//! Error types for the acquisition study.
//!
//! Every variant is fatal for the run. Statistical edge cases (empty
//! samples, null months, missing marginal matches) are not errors and are
//! represented as `None` values in the results instead.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the acquisition study pipeline.
#[derive(Debug, Error)]
pub enum StudyError {
    /// The three aligned datasets do not have the same number of rows.
    #[error(
        "Array lengths are not equal. companies: {companies}, share_prices: {share_prices}, index_prices: {index_prices}"
    )]
    DatasetLengthMismatch {
        /// Number of company records.
        companies: usize,
        /// Number of share-price rows.
        share_prices: usize,
        /// Number of index-price rows.
        index_prices: usize,
    },

    /// A price row does not span the month header.
    #[error("{series} price row {row} has {actual} months, expected {expected}")]
    RowWidthMismatch {
        /// Which series ("share" or "index").
        series: &'static str,
        /// Row position in the dataset.
        row: usize,
        /// Width of the month header.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },

    /// The announcement month index lies outside the price window.
    #[error("Announcement index {index} is outside the {width}-month price window")]
    AnnouncementIndexOutOfRange {
        /// Configured announcement index.
        index: usize,
        /// Width of the price window.
        width: usize,
    },

    /// The dataset holds no acquisitions.
    #[error("Dataset contains no acquisitions")]
    EmptyDataset,

    /// No result exists for the all-"all" filter tuple.
    #[error("No baseline result found for the unfiltered filter combination")]
    MissingBaseline,

    /// More than one result exists for the all-"all" filter tuple.
    #[error("Found {count} baseline results, expected exactly one")]
    DuplicateBaseline {
        /// Number of baseline results found.
        count: usize,
    },

    /// A ranking metric name could not be parsed.
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    /// A buyer market value was null where a market-cap bucket needs it.
    #[error("Buyer '{buyer}' has no market value; rows without one must be removed upstream")]
    MissingMarketValue {
        /// Buyer identifier.
        buyer: String,
    },

    /// A buyer market value is below the configured floor.
    #[error(
        "Buyer '{buyer}' market value {market_value} is below the {floor} floor; rows below it must be removed upstream"
    )]
    MarketValueBelowFloor {
        /// Buyer identifier.
        buyer: String,
        /// Offending market value.
        market_value: Decimal,
        /// Configured floor.
        floor: Decimal,
    },

    /// A buyer identifier is missing from the transaction count index.
    #[error("Buyer '{buyer}' is not present in the transaction count index")]
    UnknownBuyer {
        /// Buyer identifier.
        buyer: String,
    },

    /// A return calculation left the representable decimal range.
    #[error("Return calculation overflowed during {operation}")]
    ArithmeticOverflow {
        /// Step that overflowed.
        operation: &'static str,
    },

    /// A parallel stage failed and produced no results.
    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        /// Stage name.
        stage: String,
        /// Error raised by the failing execution unit.
        #[source]
        source: Box<StudyError>,
    },

    /// Thread pool initialization failed.
    #[error("Failed to initialize thread pool: {message}")]
    ThreadPool {
        /// Error message.
        message: String,
    },
}

/// Result type alias for acquisition study operations.
pub type Result<T> = std::result::Result<T, StudyError>;

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_length_mismatch_message_names_all_three_datasets() {
        let err = StudyError::DatasetLengthMismatch {
            companies: 3,
            share_prices: 2,
            index_prices: 3,
        };
        let message = err.to_string();

        assert!(message.contains("companies: 3"));
        assert!(message.contains("share_prices: 2"));
        assert!(message.contains("index_prices: 3"));
    }

    #[test]
    fn test_market_value_below_floor_message() {
        let err = StudyError::MarketValueBelowFloor {
            buyer: "IQ1".to_string(),
            market_value: dec!(4.5),
            floor: dec!(10),
        };

        assert!(err.to_string().contains("4.5"));
        assert!(err.to_string().contains("IQ1"));
    }

    #[test]
    fn test_overflow_message_names_the_step() {
        let err = StudyError::ArithmeticOverflow {
            operation: "compounding",
        };

        assert_eq!(err.to_string(), "Return calculation overflowed during compounding");
    }
}
