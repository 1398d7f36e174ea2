//! Document model for compared JSON payloads.
//!
//! - `node`: the `JsonValue` tree
//! - `number`: decimal-exact numbers
//! - `parser`: JSON text to tree conversion

pub mod node;
pub mod number;
pub mod parser;

pub use node::{JsonValue, ValueKind};
pub use number::JsonNumber;
pub use parser::parse_json;
