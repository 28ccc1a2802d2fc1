// src/dataset/value.rs
//! Cell values and the loose coercion rules applied to them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a dataset row, or the operand of a filter.
///
/// Serializes untagged, so JSON `"abc"`, `42` and `true` map directly onto
/// `Text`, `Number` and `Bool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or null cell.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce to a number the loose way.
    ///
    /// Numbers are themselves, booleans are `1`/`0`, `Null` is `NaN`.
    /// Text is trimmed: empty text is `0`, otherwise it must parse as a
    /// decimal literal or the result is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => f64::NAN,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    parse_decimal(trimmed).unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Truthiness: `Null`, `false`, `0`, `NaN` and empty text are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// True for `Null` and empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String form used for grouping keys and string comparisons.
    ///
    /// `Null` renders as empty text.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }

    /// True when this value would type its column as a number.
    ///
    /// Text qualifies if, after trimming and stripping surrounding double
    /// quotes, it is non-empty and parses as a finite number.
    pub fn is_numeric_like(&self) -> bool {
        match self {
            Value::Number(n) => n.is_finite(),
            Value::Text(s) => parse_numeric_cell(s).is_some(),
            Value::Null | Value::Bool(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Trim a raw cell, strip one pair of surrounding double quotes, and parse it
/// as a finite number. Empty cells are not numbers.
pub fn parse_numeric_cell(raw: &str) -> Option<f64> {
    let cleaned = strip_quotes(raw.trim());
    if cleaned.is_empty() {
        return None;
    }
    parse_decimal(cleaned.trim()).filter(|n| n.is_finite())
}

/// Remove a leading and a trailing `"` if present.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Format a number in shortest round-trip form (`100`, `1.5`, `-0.25`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // Collapses -0.
        "0".to_string()
    } else {
        n.to_string()
    }
}

// Rust's float parser also accepts "inf", "nan" and "infinity"; cell text
// like "nan" is a label, not a number.
fn parse_decimal(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || digits.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    s.parse::<f64>().ok()
}
