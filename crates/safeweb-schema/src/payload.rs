//! # Sanitized Payload
//!
//! The output of a successful validation pass: only allow-listed keys,
//! each carrying a value of its declared type, in the caller's order.

use serde::Serialize;
use serde_json::{Map, Value};

/// A validated copy of an input object.
///
/// Only [`crate::validate`] constructs one, so every instance satisfies
/// the schema it was checked against.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SanitizedPayload {
    fields: Map<String, Value>,
}

impl SanitizedPayload {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Map::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }

    /// Retrieve a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Retrieve a text field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Retrieve an integer field that fits in `i64`.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the payload carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }

    /// Consume into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
