//! Dynamic value representation for ISON data.
//!
//! This module provides the [`Value`] enum, the closed set of scalar shapes a
//! row cell can hold: null, boolean, integer, float, string, or an inline
//! [`Reference`].
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use ison::{Reference, Value};
//!
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let name = Value::from("Alice");
//! let owner = Value::from(Reference::parse(":user:42"));
//! ```
//!
//! ### Extracting Values
//!
//! Cross-variant access returns `None` rather than erroring; the only
//! widening conversion is `Int` → `Float`:
//!
//! ```rust
//! use ison::Value;
//!
//! let v = Value::Int(42);
//! assert_eq!(v.as_int(), Some(42));
//! assert_eq!(v.as_float(), Some(42.0));
//! assert_eq!(v.as_str(), None);
//! ```
//!
//! ### Text form
//!
//! [`Value::to_ison`] renders the canonical token text; strings containing
//! whitespace or quotes are quote-wrapped and escaped:
//!
//! ```rust
//! use ison::Value;
//!
//! assert_eq!(Value::Null.to_ison(), "~");
//! assert_eq!(Value::from("Alice Smith").to_ison(), "\"Alice Smith\"");
//! ```

use crate::Reference;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// A single ISON cell value.
///
/// Exactly one variant is active at a time; nothing is coerced on storage.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Reference(Reference),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float or an integer, returns it as `f64`.
    ///
    /// This is the one widening accessor: `Int(3)` yields `Some(3.0)`.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a reference, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Renders the value as a single ISON token.
    ///
    /// Strings containing a space, tab, newline, or quote, as well as blank
    /// strings, are quote-wrapped with `\\`, `\"`, `\n`, `\t` escaped.
    /// Everything else is emitted raw.
    #[must_use]
    pub fn to_ison(&self) -> String {
        match self {
            Value::Null => "~".to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => {
                if needs_quotes(s) {
                    quote(s)
                } else {
                    s.clone()
                }
            }
            Value::Reference(r) => r.to_ison(),
        }
    }

    /// Converts the value to its generic scalar form.
    ///
    /// References become their `{_ref, _namespace, _relationship}` map form.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => JsonValue::from(*f),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Reference(r) => r.to_json(),
        }
    }
}

/// Whole finite floats keep a trailing `.0` so a re-parse stays a float.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

fn needs_quotes(s: &str) -> bool {
    s.contains(' ')
        || s.contains('\t')
        || s.contains('\n')
        || s.contains('"')
        || s.trim().is_empty()
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ison())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Reference(r) => r.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Reference(value)
    }
}
