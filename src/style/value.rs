//! Declaration values and their normalisation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StyleDeclaration;

/// A raw CSS value: text with its unit, or a bare number for unitless properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0"
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Check whether a text value counts as "no value".
///
/// Empty strings and the literals `null` / `undefined` (left behind by editor
/// controls) are never stored.
pub fn is_absent_text(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "null" || s == "undefined"
}

/// Split a trailing `!important` off a value.
fn strip_important(s: &str) -> (&str, bool) {
    let trimmed = s.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    match lower.strip_suffix("important").map(str::trim_end) {
        Some(rest) if rest.ends_with('!') => (trimmed[..rest.len() - 1].trim(), true),
        _ => (trimmed.trim(), false),
    }
}

impl StyleDeclaration {
    /// Build a declaration from a written value.
    ///
    /// Text is trimmed and a trailing `!important` becomes the flag. Absent
    /// values return `None` (the write is a delete). Unitless properties are
    /// coerced to bare numbers when the value parses as one; every other
    /// property keeps a string. An `!important` value is always text, since
    /// the wire folds the flag into a string.
    pub fn normalized(property: &str, value: StyleValue, unitless: bool) -> Option<Self> {
        let property = property.trim();
        if property.is_empty() {
            return None;
        }

        let (value, important) = match value {
            StyleValue::Text(text) => {
                let (text, important) = strip_important(&text);
                if is_absent_text(text) {
                    return None;
                }
                let value = match text.parse::<f64>() {
                    Ok(n) if unitless && !important && n.is_finite() => StyleValue::Number(n),
                    _ => StyleValue::Text(text.to_string()),
                };
                (value, important)
            }
            StyleValue::Number(n) if !n.is_finite() => return None,
            StyleValue::Number(n) if unitless => (StyleValue::Number(n), false),
            number @ StyleValue::Number(_) => (StyleValue::Text(number.to_string()), false),
        };

        Some(Self {
            property: property.to_string(),
            value,
            important,
        })
    }

    /// Set the `!important` flag, storing a number as its text form.
    pub(crate) fn into_important(mut self) -> Self {
        if let StyleValue::Number(_) = self.value {
            self.value = StyleValue::Text(self.value.to_string());
        }
        self.important = true;
        self
    }

    /// Build a declaration from a wire value without unit coercion.
    ///
    /// Strings and numbers are accepted; everything else is treated as absent.
    pub(crate) fn from_wire(property: &str, value: &Value) -> Option<Self> {
        if property.trim().is_empty() {
            return None;
        }
        match value {
            Value::String(s) => {
                let (text, important) = strip_important(s);
                if is_absent_text(text) {
                    return None;
                }
                Some(Self {
                    property: property.to_string(),
                    value: StyleValue::Text(text.to_string()),
                    important,
                })
            }
            Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).map(|n| Self {
                property: property.to_string(),
                value: StyleValue::Number(n),
                important: false,
            }),
            _ => None,
        }
    }
}
