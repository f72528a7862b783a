//! Equality and numeric comparison

use super::normalize;
use beacon_core::Value;
use std::cmp::Ordering;

/// Trimmed, case-insensitive equality; an absent value never equals anything
pub(crate) fn equals(actual: Option<&Value>, expected: &str) -> bool {
    match actual.and_then(Value::as_text) {
        Some(text) => normalize(&text) == normalize(expected),
        None => false,
    }
}

/// Numeric coercion policy.
///
/// Numbers pass through; strings are parsed after trimming. Blank strings,
/// booleans, null and non-finite results do not coerce.
pub(crate) fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n).filter(|n| n.is_finite()),
        Value::String(s) => parse_number(s),
        Value::Bool(_) | Value::Null => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compare record value against condition value numerically.
///
/// `None` when either side fails to coerce or the property is absent.
pub(crate) fn compare_numeric(actual: Option<&Value>, expected: &str) -> Option<Ordering> {
    let left = coerce_numeric(actual?)?;
    let right = parse_number(expected)?;
    left.partial_cmp(&right)
}
