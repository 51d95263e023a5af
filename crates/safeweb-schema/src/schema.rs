//! # Field Schema
//!
//! An allow-list of field names and the primitive type each must carry.
//! Built once at startup and shared read-only across requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldType;
use crate::payload::SanitizedPayload;
use crate::validate::{validate, Rejection};

/// Allow-list mapping of field name to expected [`FieldType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldType>,
}

impl Schema {
    /// Create an empty schema. An empty schema accepts only `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    /// Expected type for `name`, or `None` if the field is not allowed.
    pub fn expected(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    /// Check if a field is allowed.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of allowed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is allowed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, type)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Validate raw request bytes against this schema. See [`validate`].
    pub fn validate(&self, raw: &[u8]) -> Result<SanitizedPayload, Rejection> {
        validate(raw, self)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_registers_fields() {
        let schema = Schema::new()
            .with_field("name", FieldType::Text)
            .with_field("count", FieldType::Integer);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.expected("name"), Some(FieldType::Text));
        assert_eq!(schema.expected("count"), Some(FieldType::Integer));
        assert_eq!(schema.expected("extra"), None);
        assert!(schema.contains("name"));
        assert!(!schema.contains("extra"));
    }

    #[test]
    fn later_field_replaces_earlier() {
        let schema = Schema::new()
            .with_field("x", FieldType::Text)
            .with_field("x", FieldType::Integer);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.expected("x"), Some(FieldType::Integer));
    }

    #[test]
    fn empty_schema() {
        let schema = Schema::new();
        assert!(schema.is_empty());
        assert_eq!(schema.iter().count(), 0);
    }

    #[test]
    fn collects_from_pairs() {
        let schema: Schema = [("b", FieldType::Integer), ("a", FieldType::Text)]
            .into_iter()
            .collect();
        let names: Vec<&str> = schema.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn deserializes_from_json_object() {
        let schema: Schema =
            serde_json::from_str(r#"{"name": "text", "count": "integer"}"#).unwrap();
        assert_eq!(schema.expected("count"), Some(FieldType::Integer));
        assert_eq!(schema.expected("name"), Some(FieldType::Text));
    }

    #[test]
    fn unknown_type_tag_fails_to_deserialize() {
        let result: Result<Schema, _> = serde_json::from_str(r#"{"flag": "boolean"}"#);
        assert!(result.is_err());
    }
}
