//! Conversions from raw literal text and resolved datum values to scalars.
//!
//! These are deliberately forgiving in the same places the expression
//! language is: a bool accepts the usual textual tokens and falls back to
//! "non-empty string is true", and integers parse base-aware so `0x10`
//! means sixteen. All conversions are idempotent and cache nothing.

use serde_json::Value;

use crate::error::BexprError;

/// Coerces a value to a bool. Numbers coerce by zero-ness; strings go
/// through the accepted token set.
pub fn coerce_bool(value: &Value) -> Result<bool, BexprError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Ok(parse_bool_str(s)),
        other => Err(BexprError::Coerce(format!("cannot coerce {other} to bool"))),
    }
}

/// Coerces a value to an `i64` through its textual form.
pub fn coerce_int64(value: &Value) -> Result<i64, BexprError> {
    let text = display(value);
    parse_int_str(&text)
        .ok_or_else(|| BexprError::Coerce(format!("cannot parse {text:?} as an integer")))
}

/// Coerces a value to an `f64` through its textual form.
pub fn coerce_float64(value: &Value) -> Result<f64, BexprError> {
    let text = display(value);
    text.parse()
        .map_err(|_| BexprError::Coerce(format!("cannot parse {text:?} as a float")))
}

/// Parses a 32-bit float, verifying that the value fits the 32-bit range.
pub fn coerce_float32(value: &str) -> Result<f32, BexprError> {
    let wide: f64 = value
        .parse()
        .map_err(|_| BexprError::Coerce(format!("cannot parse {value:?} as a float")))?;
    let narrow = wide as f32;
    if wide.is_finite() && !narrow.is_finite() {
        return Err(BexprError::Coerce(format!(
            "{value:?} is out of range for a 32-bit float"
        )));
    }
    Ok(narrow)
}

/// Parses a base-aware unsigned integer.
pub fn coerce_uint64(value: &str) -> Result<u64, BexprError> {
    let (base, digits) = split_base(value);
    if digits.is_empty() {
        return Err(BexprError::Coerce(format!(
            "cannot parse {value:?} as an unsigned integer"
        )));
    }
    u64::from_str_radix(digits, base).map_err(|_| {
        BexprError::Coerce(format!("cannot parse {value:?} as an unsigned integer"))
    })
}

/// Renders a value the way comparisons see it: strings bare, every other
/// scalar in its canonical JSON form.
pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The accepted bool tokens, with the "non-empty string is true" fallback.
pub(crate) fn parse_bool_str(text: &str) -> bool {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        other => !other.is_empty(),
    }
}

/// Parses a signed integer, honoring `0x`/`0o`/`0b` base prefixes.
pub(crate) fn parse_int_str(text: &str) -> Option<i64> {
    let (sign, magnitude) = match text.as_bytes().first() {
        Some(b'-') => ("-", &text[1..]),
        Some(b'+') => ("", &text[1..]),
        _ => ("", text),
    };
    let (base, digits) = split_base(magnitude);
    if digits.is_empty() {
        return None;
    }
    i64::from_str_radix(&format!("{sign}{digits}"), base).ok()
}

fn split_base(text: &str) -> (u32, &str) {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(oct) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        (8, oct)
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, text)
    }
}
