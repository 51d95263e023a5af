//! # Field Type Tags
//!
//! The primitive types a schema field may declare.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Expected primitive type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A JSON string. Empty strings are accepted.
    Text,
    /// A JSON number written without a fraction or exponent, of any width.
    ///
    /// `-0` and literals beyond `u64` qualify. Booleans are never integers,
    /// and neither are floats such as `3.0` or `1e2`.
    Integer,
}

impl FieldType {
    /// Return the string representation of this type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
        }
    }

    /// Check whether a JSON value has this runtime type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Text, Value::String(_)) => true,
            (Self::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || is_integer_literal(&n.to_string())
            }
            _ => false,
        }
    }
}

/// serde_json is built with `arbitrary_precision`, so a number's string
/// form is the literal as written.
fn is_integer_literal(literal: &str) -> bool {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
