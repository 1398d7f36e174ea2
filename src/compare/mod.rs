//! Structural comparison of an actual document against an expected one.
//!
//! The walk is driven by the expected document: every expected position must
//! be satisfied by the actual document, either by equality, by a matcher
//! expression, or by being ignored. In strict mode the actual document may not
//! carry surplus keys or array elements.
//!
//! # Example
//!
//! ```
//! use treematch::compare::{compare, ModeConfig};
//! use treematch::document::parse_json;
//! use treematch::matcher::MatcherRegistry;
//!
//! let actual = parse_json(r#"{"id": "x123456789x", "extra": true}"#).unwrap();
//! let expected = parse_json(r#"{"id": "@matches('x[0-9]+x')@"}"#).unwrap();
//! let matchers = MatcherRegistry::with_defaults();
//!
//! assert!(compare(&actual, &expected, &ModeConfig::lenient(), &matchers).is_ok());
//!
//! let failure = compare(&actual, &expected, &ModeConfig::strict(), &matchers).unwrap_err();
//! assert_eq!(
//!     failure.to_string(),
//!     "Number of entries is not equal in element: '$', expected '[id]' but was '[id, extra]'"
//! );
//! ```

pub mod engine;
pub mod error;
pub mod mode;

pub use engine::Comparator;
pub use error::{FailureKind, ValidationFailure};
pub use mode::ModeConfig;

use crate::document::node::JsonValue;
use crate::matcher::MatcherResolver;
use crate::path::PathNode;

/// Validates the subtree rooted at `root`.
pub fn validate(
    root: &PathNode<'_>,
    config: &ModeConfig,
    matchers: &dyn MatcherResolver,
) -> Result<(), ValidationFailure> {
    Comparator::new(config, matchers).validate(root)
}

/// Validates a whole actual document against a whole expected document.
pub fn compare(
    actual: &JsonValue,
    expected: &JsonValue,
    config: &ModeConfig,
    matchers: &dyn MatcherResolver,
) -> Result<(), ValidationFailure> {
    validate(&PathNode::root(actual, expected), config, matchers)
}
