//! Exact decimal handling for monetary amounts and quantities
//!
//! Amounts are parsed from their textual representation, never through binary
//! floating point. Unparseable or missing values become zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Number of fractional digits used for reported amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Convert an optional raw value into a decimal
///
/// Strings and JSON numbers are parsed from their text; everything else is zero.
pub fn to_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::String(s)) => parse_decimal(s).unwrap_or(Decimal::ZERO),
        Some(Value::Number(n)) => parse_decimal(&n.to_string()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Parse decimal text, accepting plain and scientific notation
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Round half-up (away from zero on ties) to two decimal places
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimal digits
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use weclapp_export::domain::money::format_amount;
///
/// assert_eq!(format_amount(Decimal::from_str("12.345").unwrap()), "12.35");
/// assert_eq!(format_amount(Decimal::from(25)), "25.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_amount(value);
    rounded.rescale(AMOUNT_SCALE);
    rounded.to_string()
}
