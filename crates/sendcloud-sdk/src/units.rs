//! Unit conversions between the vendor's wire representation and internal values.
//!
//! Sendcloud sends weights as decimal kilogram strings (`"2.486"`) and prices
//! as decimal major currency units (`3.5`). Internally weights are whole
//! grams and prices are integer minor units (cents).
//!
//! All arithmetic runs on [`Decimal`] parsed from the wire text, so
//! `"2.486"` is exactly 2.486 and never a nearby binary float. Rounding to
//! whole units uses [`ROUNDING`]: halves round away from zero, so
//! `"0.0025"` kg is 3 g, not 2 g.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::error::MappingError;

/// Rounding rule for every unit conversion in this crate.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

const GRAMS_PER_KILOGRAM: i64 = 1000;
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Parse a JSON string or number into an exact decimal.
///
/// Numbers are parsed from their shortest textual form, which is what the
/// vendor wrote on the wire.
///
/// # Errors
///
/// Returns [`MappingError::InvalidField`] for non-numeric strings and for
/// values that are neither strings nor numbers.
pub fn parse_decimal(field: &str, value: &Value) -> Result<Decimal, MappingError> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(MappingError::invalid(
                field,
                format!("expected a decimal number, got {}", json_kind(other)),
            ))
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| MappingError::invalid(field, format!("'{}' is not a decimal: {}", text, e)))
}

/// Convert kilograms to whole grams.
///
/// # Errors
///
/// Returns [`MappingError::InvalidField`] for negative or out-of-range weights.
pub fn kilograms_to_grams(field: &str, kilograms: Decimal) -> Result<u64, MappingError> {
    // Small negatives would otherwise round to zero.
    if kilograms < Decimal::ZERO {
        return Err(MappingError::invalid(
            field,
            format!("{} kg is negative", kilograms),
        ));
    }

    scale_and_round(kilograms, GRAMS_PER_KILOGRAM)
        .and_then(|grams| grams.to_u64())
        .ok_or_else(|| MappingError::invalid(field, format!("{} kg is not a valid weight", kilograms)))
}

/// Render whole grams as the vendor's kilogram string with three decimals.
///
/// `2486` becomes `"2.486"` and `1000` becomes `"1.000"`.
pub fn grams_to_kilograms(grams: u64) -> String {
    Decimal::from_i128_with_scale(i128::from(grams), 3).to_string()
}

/// Convert a decimal amount in major currency units to integer minor units.
///
/// # Errors
///
/// Returns [`MappingError::InvalidField`] when the result does not fit in an `i64`.
pub fn major_to_minor(field: &str, amount: Decimal) -> Result<i64, MappingError> {
    scale_and_round(amount, MINOR_UNITS_PER_MAJOR)
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| MappingError::invalid(field, format!("{} is not a valid price", amount)))
}

/// Round a monetary value to two decimal places.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, ROUNDING)
}

fn scale_and_round(value: Decimal, factor: i64) -> Option<Decimal> {
    value
        .checked_mul(Decimal::from(factor))
        .map(|scaled| scaled.round_dp_with_strategy(0, ROUNDING))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "units_tests.rs"]
mod tests;
