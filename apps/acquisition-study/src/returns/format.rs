//! Formatting utilities for return display.

use rust_decimal::Decimal;

use super::constants::HUNDRED;

/// Format a decimal return as percentage string.
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value * HUNDRED)
}

/// Format an optional return as percentage string.
#[must_use]
pub fn format_optional_pct(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_pct)
}
