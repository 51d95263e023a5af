//! # safeweb-schema — Payload Validation
//!
//! Allow-list validation of JSON request bodies. A [`Schema`] maps field
//! names to primitive [`FieldType`] tags; [`validate`] turns raw request
//! bytes into a [`SanitizedPayload`] or a [`Rejection`] naming why the body
//! was refused.
//!
//! ## Validation Pass
//!
//! One linear, fail-fast pass over the input object in document order:
//!
//! ```text
//! bytes ──parse──▶ Value ──is object?──▶ for each (key, value):
//!   parse error      → InvalidJson          key ∉ schema      → InvalidField(key)
//!   not an object    → InvalidPayload       type mismatch     → InvalidType(key)
//! ```
//!
//! Any rejection discards the whole body. There is no partial success.
//!
//! ## Crate Policy
//!
//! - No HTTP types. The service layer hands raw bytes in and maps
//!   [`Rejection`] to a response.
//! - Rejections never carry parser internals or caller-supplied values,
//!   only the offending field name.

pub mod field;
pub mod payload;
pub mod schema;
pub mod validate;

pub use field::FieldType;
pub use payload::SanitizedPayload;
pub use schema::Schema;
pub use validate::{validate, validate_value, Rejection};
