//! Request validation.
//!
//! Field constraints are declared with `#[derive(Validate)]` from the
//! `validator` crate. This module turns its error tree into flat
//! [`FieldViolation`] entries, and decodes JSON objects one field at a time
//! through [`FieldDecoder`] so every missing or mistyped field is reported in
//! the same response.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

pub use validator::{Validate, ValidationErrors};

/// One violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    #[serde(rename = "error")]
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Required field absent from the request.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "missing", "field required")
    }
}

/// Flatten `validator` errors, sorted by field name.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors.iter().map(move |error| {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => describe(&error.code, &error.params),
                };
                FieldViolation::new(field.clone(), error.code.to_string(), message)
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    violations
}

/// JSON entries suitable for an error response `details` array.
pub fn into_details(violations: Vec<FieldViolation>) -> Vec<Value> {
    violations
        .into_iter()
        .map(|violation| serde_json::to_value(violation).unwrap_or_default())
        .collect()
}

/// "failed length check (max = 100, min = 1)"
fn describe<K, V>(code: &str, params: &std::collections::HashMap<K, V>) -> String
where
    K: AsRef<str>,
    V: std::fmt::Display,
{
    let mut bounds: Vec<String> = params
        .iter()
        .filter(|(name, _)| name.as_ref() != "value")
        .map(|(name, value)| format!("{} = {}", name.as_ref(), value))
        .collect();
    bounds.sort();

    if bounds.is_empty() {
        format!("failed {} check", code)
    } else {
        format!("failed {} check ({})", code, bounds.join(", "))
    }
}

/// Request types decoded field by field from a JSON object.
pub trait DecodeFields: Sized {
    /// Read every field through `fields`; return `None` when any read failed.
    fn decode_fields(fields: &mut FieldDecoder<'_>) -> Option<Self>;
}

/// Decode `value` into `T`, collecting one violation per bad field.
pub fn decode<T: DecodeFields>(value: &Value) -> Result<T, Vec<FieldViolation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![FieldViolation::new(
            "body",
            "invalid_type",
            "expected a JSON object",
        )]);
    };

    let mut fields = FieldDecoder::new(object);
    let decoded = T::decode_fields(&mut fields);

    match (decoded, fields.violations) {
        (Some(value), violations) if violations.is_empty() => Ok(value),
        (_, violations) if !violations.is_empty() => Err(violations),
        // A decoder returned `None` without recording why.
        _ => Err(vec![FieldViolation::new(
            "body",
            "invalid_body",
            "request body could not be decoded",
        )]),
    }
}

/// Reads typed fields out of a JSON object, recording failures.
pub struct FieldDecoder<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldDecoder<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            violations: Vec::new(),
        }
    }

    /// Field that must be present and decode as `T`.
    pub fn required<T: DeserializeOwned>(&mut self, field: &str) -> Option<T> {
        match self.object.get(field) {
            Some(value) => self.convert(field, value),
            None => {
                self.violations.push(FieldViolation::missing(field));
                None
            }
        }
    }

    /// Field that may be absent or null; decodes as `T` otherwise.
    pub fn optional<T: DeserializeOwned>(&mut self, field: &str) -> Option<T> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.convert(field, value),
        }
    }

    fn convert<T: DeserializeOwned>(&mut self, field: &str, value: &Value) -> Option<T> {
        match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                self.violations
                    .push(FieldViolation::new(field, "invalid_type", err.to_string()));
                None
            }
        }
    }
}
