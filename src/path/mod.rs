//! Path addressing for compared documents.
//!
//! This module covers both directions of path handling:
//!
//! - `node`: `PathNode`, the addressed comparison unit, and its rendering as
//!   `$['key'][0]`
//! - `parser`, `ast`, `pattern`: ignore expressions and their matching
//!
//! # Supported Ignore Syntax
//!
//! - `$` - Root node
//! - `.property` - Named property access
//! - `['property']` - Bracket notation
//! - `['prop1','prop2']` - Any of several properties
//! - `[index]` - Array index
//! - `[*]` or `.*` - Any single key or index
//! - `..property`, `..*`, `..[index]` - Recursive descent

pub mod ast;
pub mod error;
pub mod node;
pub mod parser;
pub mod pattern;

pub use ast::{PathExpression, PathSegment};
pub use error::PathError;
pub use node::{PathNode, PathStep, Selector};
pub use parser::Parser;
pub use pattern::{IgnorePattern, IgnoreRules};
