//! Named matcher functions referenced from expected documents.
//!
//! The comparison engine never looks matchers up through global state: callers
//! pass a `MatcherResolver` (usually a `MatcherRegistry`) into each comparison.
//!
//! # Example
//!
//! ```
//! use treematch::matcher::{MatcherContext, MatcherRegistry, MatcherResolver};
//!
//! let mut registry = MatcherRegistry::with_defaults();
//! registry.register_fn("isEven", |actual, _args, _ctx| {
//!     match actual.parse::<i64>() {
//!         Ok(n) if n % 2 == 0 => Ok(()),
//!         _ => Err(format!("'{}' is not an even number", actual)),
//!     }
//! });
//!
//! let ctx = MatcherContext::new("$['n']", "n");
//! let matcher = registry.resolve("isEven").unwrap();
//! assert!(matcher.validate("4", &[], &ctx).is_ok());
//! assert!(matcher.validate("5", &[], &ctx).is_err());
//! ```

pub mod builtin;
pub mod expression;

pub use expression::{is_ignore_marker, MatcherExpression, IGNORE_PLACEHOLDER};

use std::collections::BTreeMap;
use std::fmt;

/// Information about the position a matcher is validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherContext<'a> {
    /// Rendered path of the node, e.g. `$['person']['name']`
    pub path: &'a str,
    /// The node's own name (`$`, bare key, or `[N]`)
    pub field: &'a str,
}

impl<'a> MatcherContext<'a> {
    pub fn new(path: &'a str, field: &'a str) -> Self {
        Self { path, field }
    }
}

/// A named validation function.
///
/// `actual` is the stringified actual value: strings raw, other values as
/// compact JSON, absent or null values as `null`. On rejection the matcher
/// returns a message citing the actual value and the failing argument.
pub trait Matcher: Send + Sync {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        context: &MatcherContext<'_>,
    ) -> Result<(), String>;
}

impl<F> Matcher for F
where
    F: Fn(&str, &[String], &MatcherContext<'_>) -> Result<(), String> + Send + Sync,
{
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        context: &MatcherContext<'_>,
    ) -> Result<(), String> {
        self(actual, arguments, context)
    }
}

/// Resolves matcher names to implementations.
pub trait MatcherResolver {
    fn resolve(&self, name: &str) -> Option<&dyn Matcher>;
}

/// A name-keyed set of matchers, open to registration at runtime.
#[derive(Default)]
pub struct MatcherRegistry {
    matchers: BTreeMap<String, Box<dyn Matcher>>,
}

impl MatcherRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding all built-in matchers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        builtin::register_defaults(&mut registry);
        registry
    }

    /// Registers `matcher` under `name`, replacing any previous registration.
    pub fn register<M>(&mut self, name: impl Into<String>, matcher: M)
    where
        M: Matcher + 'static,
    {
        self.matchers.insert(name.into(), Box::new(matcher));
    }

    /// Registers a closure as a matcher.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, matcher: F)
    where
        F: Fn(&str, &[String], &MatcherContext<'_>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.register(name, matcher);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matchers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matchers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl MatcherResolver for MatcherRegistry {
    fn resolve(&self, name: &str) -> Option<&dyn Matcher> {
        self.matchers.get(name).map(|matcher| matcher.as_ref())
    }
}

impl fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherRegistry")
            .field("matchers", &self.matchers.keys().collect::<Vec<_>>())
            .finish()
    }
}
