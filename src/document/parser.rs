//! JSON text to `JsonValue` conversion.
//!
//! Parsing itself is delegated to `serde_json` (built with `preserve_order` and
//! `arbitrary_precision`), this module only converts the result into the
//! comparison tree so that key order and number literals survive unchanged.
//!
//! # Example
//!
//! ```
//! use treematch::document::parser::parse_json;
//!
//! let value = parse_json(r#"{"name": "Alice", "age": 30.50}"#).unwrap();
//! assert_eq!(value.to_string(), r#"{"name":"Alice","age":30.50}"#);
//! ```

use super::node::JsonValue;
use super::number::JsonNumber;
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde_json::Value as SerdeValue;

/// Parses a JSON string into a `JsonValue`.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
pub fn parse_json(content: &str) -> Result<JsonValue> {
    let value: SerdeValue = serde_json::from_str(content).context("Invalid JSON")?;
    parse_value(&value)
}

/// Converts a `serde_json::Value` into a `JsonValue`.
///
/// # Errors
///
/// Returns an error if a number literal cannot be represented, which only
/// happens for inputs that did not come from the serde_json parser.
pub fn parse_value(value: &SerdeValue) -> Result<JsonValue> {
    Ok(match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(*b),
        SerdeValue::Number(n) => {
            let text = n.to_string();
            let number = JsonNumber::parse(&text)
                .ok_or_else(|| anyhow!("Unsupported number literal: {}", text))?;
            JsonValue::Number(number)
        }
        SerdeValue::String(s) => JsonValue::String(s.clone()),
        SerdeValue::Array(items) => {
            JsonValue::Array(items.iter().map(parse_value).collect::<Result<Vec<_>>>()?)
        }
        SerdeValue::Object(map) => {
            let mut fields = IndexMap::with_capacity(map.len());
            for (key, child) in map {
                fields.insert(key.clone(), parse_value(child)?);
            }
            JsonValue::Object(fields)
        }
    })
}
