//! Field coercion rules.
//!
//! One place owns every fallback the transformers rely on, so the defaults
//! are uniform instead of repeated per field:
//!
//! - numeric text that does not parse becomes 0
//! - malformed embedded JSON becomes the structural default
//! - relational fields accept either a nested `{"Id": n}` object or a bare id
//!
//! All functions take `Option<&Value>` so a missing field and a malformed
//! one degrade through the same path.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Monetary coercion: finite, non-negative decimal, 0 otherwise.
#[must_use]
pub fn decimal_or_zero(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => n.as_f64().and_then(Decimal::from_f64),
        },
        _ => None,
    };
    match parsed {
        Some(d) if d.is_sign_negative() => Decimal::ZERO,
        Some(d) => d,
        None => Decimal::ZERO,
    }
}

/// Count coercion: non-negative integer, 0 otherwise.
///
/// String input takes the leading decimal digits, so `"12 left"` coerces
/// to 12 while `"abc"` coerces to 0.
#[must_use]
pub fn uint_or_zero(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => u32::try_from(v).unwrap_or(0),
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, |f| f.trunc() as u32),
        },
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

/// String coercion: empty string when absent or non-text.
#[must_use]
pub fn string_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Boolean coercion: false when absent or unrecognized.
#[must_use]
pub fn bool_or_false(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Embedded JSON list: decodes JSON-encoded text (or an already-decoded
/// array), empty on malformed input.
#[must_use]
pub fn json_list_or_empty<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::String(s)) => serde_json::from_str(s).unwrap_or_default(),
        Some(v @ Value::Array(_)) => serde_json::from_value(v.clone()).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Embedded JSON object: decodes JSON-encoded text (or an already-decoded
/// object), structural default on malformed input.
#[must_use]
pub fn json_struct_or_default<T: DeserializeOwned + Default>(value: Option<&Value>) -> T {
    match value {
        Some(Value::String(s)) => serde_json::from_str(s).unwrap_or_default(),
        Some(v @ Value::Object(_)) => serde_json::from_value(v.clone()).unwrap_or_default(),
        _ => T::default(),
    }
}

/// Relational reference: accepts a nested `{"Id": n}` object, a bare
/// number, or numeric text.
#[must_use]
pub fn record_ref(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Object(map)) => map.get("Id").and_then(Value::as_i64),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// RFC 3339 timestamp text; `None` when absent or malformed.
#[must_use]
pub fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
