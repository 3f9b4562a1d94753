//! Validated field access over vendor JSON objects.
//!
//! [`JsonObject`] applies the inbound nullable-field policy in one place:
//!
//! - `required_*` accessors fail with [`MappingError::MissingField`] when the
//!   key is absent or null, and with [`MappingError::InvalidField`] when the
//!   value has the wrong shape.
//! - `optional_*` accessors return `None` for absent, null and empty-string
//!   values. Missing data is never coerced to `""` or `0`.
//!
//! Error field names are dotted paths from the root (`parcel.status.id`).

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::units::{json_kind, parse_decimal};

/// A JSON object paired with its path from the document root.
#[derive(Debug, Clone)]
pub(crate) struct JsonObject<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Treat `value` as an object rooted at `path`.
    pub(crate) fn new(value: &'a Value, path: impl Into<String>) -> Result<Self, MappingError> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { path, map }),
            Value::Null => Err(MappingError::missing(path)),
            other => Err(MappingError::invalid(
                path,
                format!("expected an object, got {}", json_kind(other)),
            )),
        }
    }

    pub(crate) fn map(&self) -> &'a Map<String, Value> {
        self.map
    }

    /// Dotted path of `key` below this object.
    pub(crate) fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Value of `key`, treating null as absent.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    /// Value of `key`, treating null and `""` as absent.
    fn get_non_empty(&self, key: &str) -> Option<&'a Value> {
        self.get(key)
            .filter(|value| !matches!(value, Value::String(s) if s.is_empty()))
    }

    fn require(&self, key: &str) -> Result<&'a Value, MappingError> {
        self.get(key)
            .ok_or_else(|| MappingError::missing(self.path_of(key)))
    }

    /// Nested object stored under `key`, or `None` when absent or null.
    pub(crate) fn optional_object(&self, key: &str) -> Result<Option<JsonObject<'a>>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            // PHP-style backends send `[]` for an empty object.
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(value) => JsonObject::new(value, self.path_of(key)).map(Some),
        }
    }

    /// Nested object stored under `key`.
    pub(crate) fn object(&self, key: &str) -> Result<JsonObject<'a>, MappingError> {
        JsonObject::new(self.require(key)?, self.path_of(key))
    }

    /// String value of `key`. The string may be empty.
    pub(crate) fn required_string(&self, key: &str) -> Result<String, MappingError> {
        let value = self.require(key)?;
        scalar_to_string(value).ok_or_else(|| self.wrong_type(key, "a string", value))
    }

    /// Non-empty string value of `key`. Numbers are rendered as text.
    pub(crate) fn optional_string(&self, key: &str) -> Result<Option<String>, MappingError> {
        match self.get_non_empty(key) {
            None => Ok(None),
            Some(value) => scalar_to_string(value)
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a string", value)),
        }
    }

    /// Unsigned integer value of `key`, given as a JSON number or a numeric string.
    pub(crate) fn required_u64(&self, key: &str) -> Result<u64, MappingError> {
        let value = self.require(key)?;
        self.to_u64(key, value)
    }

    /// Unsigned integer value of `key`, or `None` when absent, null or `""`.
    pub(crate) fn optional_u64(&self, key: &str) -> Result<Option<u64>, MappingError> {
        match self.get_non_empty(key) {
            None => Ok(None),
            Some(value) => self.to_u64(key, value).map(Some),
        }
    }

    /// Exact decimal value of `key`.
    pub(crate) fn required_decimal(&self, key: &str) -> Result<Decimal, MappingError> {
        let value = self.require(key)?;
        parse_decimal(&self.path_of(key), value)
    }

    /// Exact decimal value of `key`, or `None` when absent, null or `""`.
    pub(crate) fn optional_decimal(&self, key: &str) -> Result<Option<Decimal>, MappingError> {
        match self.get_non_empty(key) {
            None => Ok(None),
            Some(value) => parse_decimal(&self.path_of(key), value).map(Some),
        }
    }

    /// Boolean value of `key`, or `None` when absent or null.
    pub(crate) fn optional_bool(&self, key: &str) -> Result<Option<bool>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(value) => Err(self.wrong_type(key, "a boolean", value)),
        }
    }

    /// Array value of `key`, or `None` when absent or null.
    pub(crate) fn optional_array(&self, key: &str) -> Result<Option<&'a Vec<Value>>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(value) => Err(self.wrong_type(key, "an array", value)),
        }
    }

    fn to_u64(&self, key: &str, value: &Value) -> Result<u64, MappingError> {
        let parsed = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.wrong_type(key, "an unsigned integer", value))
    }

    fn wrong_type(&self, key: &str, expected: &str, value: &Value) -> MappingError {
        MappingError::invalid(
            self.path_of(key),
            format!("expected {}, got {}", expected, json_kind(value)),
        )
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
