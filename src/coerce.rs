//! Conversion of untyped values to primitive representations.

use crate::text::is_empty_value;
use clap::ValueEnum;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::sync::OnceLock;

/// Target representation for [`coerce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    Bool,
    Int,
    Float,
    /// Two-decimal currency string.
    Price,
    Str,
}

impl Coercion {
    /// Map a loose type tag (`"b"`, `"bool"`, `"integer"`, `"price"`,
    /// `"string"`, `"html"`, `"url"`, ...) to a coercion.
    ///
    /// Returns `None` for tags no coercion applies to; such values are used
    /// unchanged.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        if tag.starts_with('b') {
            Some(Coercion::Bool)
        } else if tag.starts_with('f') {
            Some(Coercion::Float)
        } else if tag.starts_with('i') {
            Some(Coercion::Int)
        } else if tag.starts_with("price") {
            Some(Coercion::Price)
        } else if ["str", "htm", "url"].iter().any(|t| tag.contains(t)) {
            Some(Coercion::Str)
        } else {
            None
        }
    }
}

/// Options for [`coerce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceOptions {
    /// Separator used when rendering arrays as strings.
    pub separator: String,
}

impl Default for CoerceOptions {
    fn default() -> Self {
        Self {
            separator: ", ".to_string(),
        }
    }
}

impl CoerceOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

/// Convert `value` to the representation selected by `kind`.
pub fn coerce(value: &Value, kind: Coercion, options: &CoerceOptions) -> Value {
    match kind {
        Coercion::Bool => Value::Bool(to_bool(value)),
        Coercion::Int => Value::from(to_int(value)),
        Coercion::Float => Number::from_f64(to_float(value))
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0)),
        Coercion::Price => Value::String(to_price(value)),
        Coercion::Str => Value::String(to_text(value, options)),
    }
}

/// Apply a loose type tag; unknown tags return the value unchanged.
pub fn coerce_tagged(value: &Value, tag: &str, options: &CoerceOptions) -> Value {
    match Coercion::from_tag(tag) {
        Some(kind) => coerce(value, kind, options),
        None => value.clone(),
    }
}

/// Truthiness. Strings starting with `0`, `of`, `f` or `n` (any case) are
/// false; everything else is true unless empty.
pub fn to_bool(value: &Value) -> bool {
    if let Value::String(s) = value {
        let lower = s.to_ascii_lowercase();
        if ["0", "of", "f", "n"].iter().any(|p| lower.starts_with(p)) {
            return false;
        }
    }
    !is_empty_value(value)
}

/// Integer parse of the leading numeric prefix. Unparseable input is `1` for
/// boolean `true`, `0` otherwise.
pub fn to_int(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        other => parse_int_prefix(&loose_string(other)),
    };
    parsed.unwrap_or_else(|| bool_fallback(value) as i64)
}

/// Float parse of the leading numeric prefix, with the same fallback as
/// [`to_int`].
pub fn to_float(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        other => parse_float_prefix(&loose_string(other)),
    };
    parsed
        .filter(|f| f.is_finite())
        .unwrap_or_else(|| bool_fallback(value) as i64 as f64)
}

/// Currency rendering: rounded half-up to cents, always two fraction digits.
pub fn to_price(value: &Value) -> String {
    let cents = (to_float(value) * 100.0 + 0.5).floor();
    let amount = cents / 100.0;
    // Avoid rendering "-0.00" for tiny negative amounts.
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.2}", amount)
}

/// String rendering for display.
pub fn to_text(value: &Value, options: &CoerceOptions) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => join_items(items, &options.separator),
        Value::Object(_) => value.to_string(),
    }
}

fn join_items(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::Array(nested) => join_items(nested, ","),
            other => to_text(other, &CoerceOptions::default()),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn bool_fallback(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

/// Render a number without a trailing `.0` for integral floats.
pub fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Text form used before numeric prefix parsing.
fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Array(items) => join_items(items, ","),
        other => to_text(other, &CoerceOptions::default()),
    }
}

fn float_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid regex")
    })
}

fn int_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([+-]?)(?:0[xX]([0-9a-fA-F]+)|([0-9]+))").expect("valid regex")
    })
}

/// Parse the longest leading float literal, ignoring leading whitespace.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let m = float_prefix().find(s.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// Parse the longest leading integer literal (decimal or `0x` hex), ignoring
/// leading whitespace. Values beyond the `i64` range saturate.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let caps = int_prefix().captures(s.trim_start())?;
    let negative = &caps[1] == "-";
    let magnitude = if let Some(hex) = caps.get(2) {
        i64::from_str_radix(hex.as_str(), 16).unwrap_or(i64::MAX)
    } else {
        let digits = caps.get(3)?.as_str();
        digits
            .parse::<i64>()
            .unwrap_or_else(|_| digits.parse::<f64>().map(|f| f as i64).unwrap_or(i64::MAX))
    };
    Some(if negative { -magnitude } else { magnitude })
}
