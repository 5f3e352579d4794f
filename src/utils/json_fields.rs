//! Field accessors for hand-walking JSON reply objects.
//!
//! The service omits empty strings, zero numbers and empty lists, so "absent"
//! and "empty" are treated alike by the optional accessors.
//!
//! Fixed-shape objects derive `Deserialize` and go through [`from_value`];
//! the `de_*` functions are their `deserialize_with` hooks.

use crate::{Error, ErrorContext, Result};
use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/// Stand-in for an absent nested object.
pub(crate) static NULL: Value = Value::Null;

/// Non-empty string at `key`.
pub(crate) fn opt_str(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn req_str(obj: &Value, key: &str, source: &str) -> Result<String> {
    opt_str(obj, key).ok_or_else(|| {
        Error::decode_with_context(
            format!("missing string field '{}'", key),
            ErrorContext::new().with_field_path(key).with_source(source),
        )
    })
}

pub(crate) fn opt_f32(obj: &Value, key: &str) -> Option<f32> {
    obj.get(key).and_then(|v| v.as_f64()).map(|v| v as f32)
}

pub(crate) fn opt_u32(obj: &Value, key: &str) -> Result<Option<u32>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| Error::decode(format!("field '{}' is not an unsigned integer: {}", key, v))),
    }
}

/// List at `key`; absent or null is an empty list, anything else but an array is an error.
pub(crate) fn list<'a>(obj: &'a Value, key: &str, source: &str) -> Result<&'a [Value]> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(Error::decode_with_context(
            format!("expected a list under '{}', found {}", key, type_name(other)),
            ErrorContext::new().with_field_path(key).with_source(source),
        )),
    }
}

pub(crate) fn opt_timestamp(obj: &Value, key: &str) -> Result<Option<DateTime<Utc>>> {
    match opt_str(obj, key) {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::decode(format!("field '{}' is not an RFC 3339 timestamp: {}", key, e))),
    }
}

/// Deserialize a fixed-shape object, reporting failure as a decode error.
pub(crate) fn from_value<T: DeserializeOwned>(value: &Value, source: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| {
        Error::decode_with_context(e.to_string(), ErrorContext::new().with_source(source))
    })
}

/// Zero confidence is indistinguishable from "not set" on the wire, so both
/// forms read it as `None`.
pub(crate) fn non_zero(value: f32) -> Option<f32> {
    (value != 0.0).then_some(value)
}

pub(crate) fn de_non_empty<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    let s = String::deserialize(d)?;
    if s.is_empty() {
        return Err(de::Error::invalid_value(Unexpected::Str(""), &"a non-empty string"));
    }
    Ok(s)
}

pub(crate) fn de_opt_str<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.is_empty()))
}

/// A number, or a bool standing for presence (1.0) or absence (0.0).
pub(crate) fn de_confidence<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<f32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Confidence {
        Flag(bool),
        Score(f32),
    }
    let score = match Option::<Confidence>::deserialize(d)? {
        None => return Ok(None),
        Some(Confidence::Flag(true)) => 1.0,
        Some(Confidence::Flag(false)) => 0.0,
        Some(Confidence::Score(score)) => score,
    };
    Ok(non_zero(score))
}

pub(crate) fn de_opt_timestamp<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    match de_opt_str(d)? {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| de::Error::custom(format!("'{}' is not an RFC 3339 timestamp: {}", raw, e))),
    }
}

pub(crate) fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
