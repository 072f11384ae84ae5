//! Filter combination space and per-row predicate evaluation.

pub mod dimensions;
mod grid;
mod predicate;
mod tuple;

pub use dimensions::{
    AcquirerMarketCap, AcquisitionStatus, AcquisitionType, AcquisitionsNumber, DateRange,
    DealTypeFilter, FilterDimension, PublicOrPrivate, TransactionSize,
};
pub use grid::{FilterOptions, FilterOptionsBuilder};
pub use predicate::{BuyerTransactionIndex, FilterPredicate};
pub use tuple::FilterTuple;
