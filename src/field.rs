//! Shape-polymorphic field decoding.
//!
//! The upstream schema writes many rule fields either as one bare string or
//! as an array of strings, depending on how many values an author needed.
//! Every field goes through `decode_field` with the shape its key declares,
//! so per-field code never inspects JSON types itself. The configured
//! `MetaPolicy` runs on every decoded string (scalars, sequence elements and
//! map values; map keys are left alone).

use crate::config::MetaPolicy;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Canonical type a field is coerced into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldShape {
    /// Exactly one JSON string.
    Scalar,
    /// A JSON string (promoted to one element) or an array of strings.
    Sequence,
    /// A JSON object whose values are strings.
    Map,
}

impl FieldShape {
    /// Human-readable description of the accepted JSON encodings.
    pub fn label(&self) -> &'static str {
        match self {
            FieldShape::Scalar => "string",
            FieldShape::Sequence => "string or array of strings",
            FieldShape::Map => "object of strings",
        }
    }
}

/// Result of decoding one raw value, narrowed by the caller per field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Scalar(String),
    Sequence(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    pub fn into_scalar(self) -> Option<String> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Vec<String>> {
        match self {
            FieldValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<BTreeMap<String, String>> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// A raw value did not match the requested shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShapeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ShapeMismatch {
    fn new(shape: FieldShape, found: &'static str) -> Self {
        Self {
            expected: shape.label(),
            found,
        }
    }
}

/// Decode `raw` into `shape`, applying `meta` to every decoded string.
pub fn decode_field(
    raw: &Value,
    shape: FieldShape,
    meta: MetaPolicy,
) -> Result<FieldValue, ShapeMismatch> {
    match shape {
        FieldShape::Scalar => decode_scalar(raw, meta).map(FieldValue::Scalar),
        FieldShape::Sequence => decode_sequence(raw, meta).map(FieldValue::Sequence),
        FieldShape::Map => decode_map(raw, meta).map(FieldValue::Map),
    }
}

fn decode_scalar(raw: &Value, meta: MetaPolicy) -> Result<String, ShapeMismatch> {
    match raw {
        Value::String(value) => Ok(meta.apply(value)),
        other => Err(ShapeMismatch::new(FieldShape::Scalar, json_kind(other))),
    }
}

fn decode_sequence(raw: &Value, meta: MetaPolicy) -> Result<Vec<String>, ShapeMismatch> {
    match raw {
        Value::String(value) => Ok(vec![meta.apply(value)]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(value) => Ok(meta.apply(value)),
                _ => Err(ShapeMismatch::new(
                    FieldShape::Sequence,
                    "array with a non-string element",
                )),
            })
            .collect(),
        other => Err(ShapeMismatch::new(FieldShape::Sequence, json_kind(other))),
    }
}

fn decode_map(raw: &Value, meta: MetaPolicy) -> Result<BTreeMap<String, String>, ShapeMismatch> {
    let Value::Object(entries) = raw else {
        return Err(ShapeMismatch::new(FieldShape::Map, json_kind(raw)));
    };
    decode_string_entries(entries, meta)
}

fn decode_string_entries(
    entries: &Map<String, Value>,
    meta: MetaPolicy,
) -> Result<BTreeMap<String, String>, ShapeMismatch> {
    entries
        .iter()
        .map(|(key, value)| match value {
            Value::String(value) => Ok((key.clone(), meta.apply(value))),
            _ => Err(ShapeMismatch::new(
                FieldShape::Map,
                "object with a non-string value",
            )),
        })
        .collect()
}

/// Short JSON type name used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
