//! Tree value representation shared by actual and expected documents.
//!
//! `JsonValue` is a closed tagged union over the JSON kinds. Objects keep their
//! keys in document order (via `IndexMap`) so that diagnostics list entries the
//! way the document wrote them.
//!
//! # Example
//!
//! ```
//! use treematch::document::node::JsonValue;
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), JsonValue::from("treematch"));
//! map.insert("tags".to_string(), JsonValue::Array(vec![JsonValue::from(1i64), JsonValue::Null]));
//! let object = JsonValue::Object(map);
//!
//! assert!(object.is_object());
//! assert_eq!(object.to_string(), r#"{"name":"treematch","tags":[1,null]}"#);
//! ```

use super::number::JsonNumber;
use indexmap::IndexMap;
use std::fmt;

/// The structural kind of a value, used in type mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Object => "Object",
            ValueKind::Array => "Array",
            ValueKind::String => "String",
            ValueKind::Number => "Number",
            ValueKind::Boolean => "Boolean",
            ValueKind::Null => "Null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed JSON value.
///
/// This enum represents the core JSON types: objects, arrays, strings, numbers,
/// booleans, and null. Containers hold `JsonValue` children directly; the tree
/// is never mutated during comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A JSON object containing key-value pairs in document order
    Object(IndexMap<String, JsonValue>),
    /// A JSON array containing ordered values
    Array(Vec<JsonValue>),
    /// A JSON string
    String(String),
    /// A JSON number compared by decimal value
    Number(JsonNumber),
    /// A JSON boolean
    Boolean(bool),
    /// A JSON null value
    Null,
}

impl JsonValue {
    /// Returns the structural kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Object(_) => ValueKind::Object,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::Boolean(_) => ValueKind::Boolean,
            JsonValue::Null => ValueKind::Null,
        }
    }

    /// Returns true if this value is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use treematch::document::node::JsonValue;
    /// use indexmap::IndexMap;
    ///
    /// let obj = JsonValue::Object(IndexMap::new());
    /// assert!(obj.is_object());
    ///
    /// let num = JsonValue::from(42i64);
    /// assert!(!num.is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this value is a container (object or array).
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Returns the string content if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value the way it appears inside diagnostic messages.
    ///
    /// Strings are returned raw (no quotes), everything else as compact JSON.
    ///
    /// ```
    /// use treematch::document::node::JsonValue;
    ///
    /// assert_eq!(JsonValue::from("x123").to_message_text(), "x123");
    /// assert_eq!(JsonValue::Null.to_message_text(), "null");
    /// ```
    pub fn to_message_text(&self) -> String {
        match self {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Writes a string as a quoted JSON string literal.
fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// Compact JSON rendering (`{"a":1,"b":[true,null]}`).
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_string(f, key)?;
                    write!(f, ":{}", value)?;
                }
                f.write_str("}")
            }
            JsonValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            JsonValue::String(s) => write_json_string(f, s),
            JsonValue::Number(n) => write!(f, "{}", n),
            JsonValue::Boolean(b) => write!(f, "{}", b),
            JsonValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(JsonNumber::from(value))
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(value: JsonNumber) -> Self {
        JsonValue::Number(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}
