//! Directive value coercion.
//!
//! # Responsibilities
//! - Turn the raw text after `@name:` into a typed value
//! - Recognise flags, booleans, numbers, arrays, quoted and bare strings
//!
//! # Design Decisions
//! - `true`/`false` are matched case-sensitively
//! - Numbers are validated by a scanner before `f64` parsing so words like
//!   `inf` or `NaN` stay strings, as do literals that overflow `f64`
//! - Arrays split on top-level commas only; nested arrays and quoted commas
//!   are kept intact
//! - No escape processing inside quotes

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::request::error::DirectiveError;

/// A typed directive value.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<DirectiveValue>),
}

impl DirectiveValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DirectiveValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            DirectiveValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number if it has no fractional part and fits an `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number()
            .filter(|n| n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER)
            .map(|n| n as i64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DirectiveValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DirectiveValue]> {
        match self {
            DirectiveValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Convert to a JSON value. Integral numbers become JSON integers.
    pub fn to_json(&self) -> Value {
        match self {
            DirectiveValue::Bool(b) => Value::Bool(*b),
            DirectiveValue::Number(n) => match self.as_integer() {
                Some(i) => Value::from(i),
                None => Value::from(*n),
            },
            DirectiveValue::String(s) => Value::from(s.as_str()),
            DirectiveValue::Array(items) => items.iter().map(Self::to_json).collect(),
        }
    }
}

impl From<bool> for DirectiveValue {
    fn from(b: bool) -> Self {
        DirectiveValue::Bool(b)
    }
}

impl From<f64> for DirectiveValue {
    fn from(n: f64) -> Self {
        DirectiveValue::Number(n)
    }
}

impl From<&str> for DirectiveValue {
    fn from(s: &str) -> Self {
        DirectiveValue::String(s.to_owned())
    }
}

// 2^53 - 1: beyond this an f64 no longer holds every integer exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for DirectiveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DirectiveValue::Bool(b) => serializer.serialize_bool(*b),
            DirectiveValue::Number(n) => match self.as_integer() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            DirectiveValue::String(s) => serializer.serialize_str(s),
            DirectiveValue::Array(items) => serializer.collect_seq(items),
        }
    }
}

/// Coerce a raw directive value into a typed value.
///
/// An empty value is a flag and yields `true`.
pub fn coerce_value(raw: &str) -> Result<DirectiveValue, DirectiveError> {
    let raw = raw.trim();

    match raw {
        "" | "true" => return Ok(DirectiveValue::Bool(true)),
        "false" => return Ok(DirectiveValue::Bool(false)),
        _ => {}
    }

    if raw.starts_with('[') {
        return coerce_array(raw);
    }

    if let Some(rest) = raw.strip_prefix('"') {
        return rest
            .strip_suffix('"')
            .map(|inner| DirectiveValue::String(inner.to_owned()))
            .ok_or(DirectiveError::UnterminatedQuote);
    }

    if is_numeric_literal(raw) {
        // Out-of-range literals overflow to infinity, which JSON cannot hold.
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => return Ok(DirectiveValue::Number(n)),
            _ => {}
        }
    }

    Ok(DirectiveValue::String(raw.to_owned()))
}

fn coerce_array(raw: &str) -> Result<DirectiveValue, DirectiveError> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or(DirectiveError::UnbalancedBrackets)?;

    if inner.trim().is_empty() {
        return Ok(DirectiveValue::Array(Vec::new()));
    }

    split_top_level(inner)?
        .into_iter()
        .map(|element| {
            let element = element.trim();
            if element.is_empty() {
                Err(DirectiveError::EmptyArrayElement)
            } else {
                coerce_value(element)
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(DirectiveValue::Array)
}

/// Split on commas that are outside nested brackets and quotes.
fn split_top_level(inner: &str) -> Result<Vec<&str>, DirectiveError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '[' if !in_quote => depth += 1,
            ']' if !in_quote => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(DirectiveError::UnbalancedBrackets)?;
            }
            ',' if !in_quote && depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_quote {
        return Err(DirectiveError::UnterminatedQuote);
    }
    if depth != 0 {
        return Err(DirectiveError::UnbalancedBrackets);
    }

    parts.push(&inner[start..]);
    Ok(parts)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_numeric_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
