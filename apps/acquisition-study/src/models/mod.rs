//! Typed in-memory input records.

mod company;
mod dataset;

pub use company::{Buyer, CompanyRecord, DealType, Seller};
pub use dataset::{PriceRow, StudyDataset, price_row};
