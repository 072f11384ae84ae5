//! Decimal constants for return calculations.

use rust_decimal::Decimal;

pub const ONE: Decimal = Decimal::ONE;
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places kept on every published value.
pub const ROUNDING_SCALE: u32 = 10;

/// Decimal places kept on the running compounding product.
pub const PRODUCT_SCALE: u32 = 16;
