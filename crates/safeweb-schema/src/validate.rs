//! # Payload Validation
//!
//! Fail-fast allow-list check of a JSON object against a [`Schema`].
//!
//! Fields are visited in document order (serde_json is built with
//! `preserve_order`), so "the first offending field" is well defined and
//! matches what the caller sent. When an object repeats a key, the parser
//! keeps the last value at the first key's position.

use serde_json::Value;
use thiserror::Error;

use crate::payload::SanitizedPayload;
use crate::schema::Schema;

/// Why a request body was refused.
///
/// The `Display` form is the wire name surfaced to callers
/// (`invalid_json`, `invalid_payload`, `invalid_field:<name>`,
/// `invalid_type:<name>`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The body is not well-formed JSON.
    #[error("invalid_json")]
    InvalidJson,

    /// The body is JSON but not an object.
    #[error("invalid_payload")]
    InvalidPayload,

    /// The object carries a key the schema does not allow.
    #[error("invalid_field:{0}")]
    InvalidField(String),

    /// An allowed key carries a value of the wrong type.
    #[error("invalid_type:{0}")]
    InvalidType(String),
}

impl Rejection {
    /// Machine-readable rejection kind, without the field name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::InvalidPayload => "invalid_payload",
            Self::InvalidField(_) => "invalid_field",
            Self::InvalidType(_) => "invalid_type",
        }
    }

    /// The offending field, for field-level rejections.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidField(name) | Self::InvalidType(name) => Some(name),
            Self::InvalidJson | Self::InvalidPayload => None,
        }
    }
}

/// Parse raw request bytes and validate them against `schema`.
///
/// Parser errors are collapsed into [`Rejection::InvalidJson`]; their
/// detail is never surfaced.
pub fn validate(raw: &[u8], schema: &Schema) -> Result<SanitizedPayload, Rejection> {
    let value: Value = serde_json::from_slice(raw).map_err(|_| Rejection::InvalidJson)?;
    match value {
        Value::Object(map) => sanitize(map.into_iter(), schema),
        _ => Err(Rejection::InvalidPayload),
    }
}

/// Validate an already-parsed value against `schema`.
///
/// Same as [`validate`] minus the parse step, so it never returns
/// [`Rejection::InvalidJson`].
pub fn validate_value(value: &Value, schema: &Schema) -> Result<SanitizedPayload, Rejection> {
    match value {
        Value::Object(map) => sanitize(
            map.iter().map(|(k, v)| (k.clone(), v.clone())),
            schema,
        ),
        _ => Err(Rejection::InvalidPayload),
    }
}

fn sanitize(
    fields: impl ExactSizeIterator<Item = (String, Value)>,
    schema: &Schema,
) -> Result<SanitizedPayload, Rejection> {
    let mut out = SanitizedPayload::with_capacity(fields.len().min(schema.len()));
    for (key, value) in fields {
        let Some(expected) = schema.expected(&key) else {
            return Err(Rejection::InvalidField(key));
        };
        if !expected.matches(&value) {
            return Err(Rejection::InvalidType(key));
        }
        out.insert(key, value);
    }
    Ok(out)
}
