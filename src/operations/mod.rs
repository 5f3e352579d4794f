//! 操作工厂：每个远程操作对应一个返回 `Request<T>` 的函数。
//!
//! # Operation Factories
//!
//! Each function here describes one remote operation as a ready-to-execute
//! [`crate::Request`]. Arguments are validated up front, so a bad identifier or
//! an empty batch fails before any network call. The HTTP and RPC encodings of
//! an operation are built from the same arguments and decode to the same value.

pub mod concepts;
pub mod inputs;
pub mod models;
pub mod search;

use crate::utils::json_fields::list;
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

/// Decode the list under `key` of a reply envelope; absent means empty.
pub(crate) fn decode_list<T>(
    envelope: &Value,
    key: &str,
    decode: impl Fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    list(envelope, key, "reply")?.iter().map(decode).collect()
}

/// Decode the single entity under `key` of a reply envelope; absent is a decode error.
pub(crate) fn decode_one<T>(
    envelope: &Value,
    key: &str,
    decode: impl FnOnce(&Value) -> Result<T>,
) -> Result<T> {
    match envelope.get(key).filter(|v| !v.is_null()) {
        Some(value) => decode(value),
        None => Err(missing(key)),
    }
}

pub(crate) fn missing(key: &str) -> Error {
    Error::decode_with_context(
        format!("reply has no '{}'", key),
        ErrorContext::new().with_field_path(key).with_source("reply"),
    )
}

pub(crate) fn require_id(id: &str, field: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(Error::construction_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new().with_field_path(field),
        ));
    }
    Ok(id.to_string())
}

pub(crate) fn require_items<T>(items: &[T], field: &str) -> Result<()> {
    if items.is_empty() {
        return Err(Error::construction_with_context(
            format!("at least one entry is required in {}", field),
            ErrorContext::new().with_field_path(field),
        ));
    }
    Ok(())
}
