//! treematch - structural comparison of JSON documents.
//!
//! An actual document is validated against an expected control document.
//! Comparison can be strict or lenient, array order can be enforced or not,
//! selected paths can be ignored, and expected values can delegate to named
//! matcher functions such as `@equalsIgnoreCase('x')@`.
//!
//! # Modules
//!
//! - `document`: the `JsonValue` tree and JSON parsing
//! - `path`: path nodes, ignore expressions and their parser
//! - `matcher`: matcher expressions, the `Matcher` trait and built-ins
//! - `compare`: the comparison engine
//! - `config`: TOML configuration file
//! - `file`: loading documents from disk or stdin
//! - `logging`: tracing subscriber setup for the binary

pub mod compare;
pub mod config;
pub mod document;
pub mod file;
pub mod logging;
pub mod matcher;
pub mod path;

pub use compare::{compare, validate, Comparator, FailureKind, ModeConfig, ValidationFailure};
pub use document::{parse_json, JsonValue};
pub use matcher::{Matcher, MatcherRegistry, MatcherResolver};
