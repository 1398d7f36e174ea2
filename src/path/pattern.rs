//! Ignore expression matching over rendered path segments.
//!
//! Matching is purely structural: a pattern is compared against the list of
//! steps leading from the root to a node, never against the document values.
//! `*` consumes exactly one step, `..` consumes zero or more.
//!
//! # Example
//!
//! ```
//! use treematch::path::{IgnoreRules, PathStep};
//!
//! let rules = IgnoreRules::parse(["$..index", "$.greetings[*]"]).unwrap();
//! assert!(rules.is_ignored(&[PathStep::Key("a"), PathStep::Key("index")]));
//! assert!(rules.is_ignored(&[PathStep::Key("greetings"), PathStep::Index(4)]));
//! assert!(!rules.is_ignored(&[PathStep::Key("greetings")]));
//! ```

use super::ast::PathSegment;
use super::error::PathError;
use super::node::PathStep;
use super::parser::Parser;

/// A compiled ignore expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePattern {
    expression: String,
    segments: Vec<PathSegment>,
}

impl IgnorePattern {
    /// Parses an ignore expression such as `$..index` or `$.items[*].id`.
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidExpression` naming the expression when it
    /// does not follow the ignore expression grammar.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        let parsed = Parser::parse(expression).map_err(|err| PathError::InvalidExpression {
            expression: expression.to_string(),
            source: Box::new(err),
        })?;
        let segments = parsed
            .segments
            .into_iter()
            .filter(|segment| *segment != PathSegment::Root)
            .collect();
        Ok(Self {
            expression: expression.trim().to_string(),
            segments,
        })
    }

    /// The expression text this pattern was compiled from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns true if the pattern matches the full path given as steps.
    pub fn matches(&self, steps: &[PathStep<'_>]) -> bool {
        match_from(&self.segments, steps)
    }
}

fn match_from(pattern: &[PathSegment], steps: &[PathStep<'_>]) -> bool {
    match pattern.split_first() {
        None => steps.is_empty(),
        Some((PathSegment::RecursiveDescent, rest)) => {
            (0..=steps.len()).any(|skip| match_from(rest, &steps[skip..]))
        }
        Some((segment, rest)) => match steps.split_first() {
            Some((step, tail)) => segment_matches(segment, step) && match_from(rest, tail),
            None => false,
        },
    }
}

fn segment_matches(segment: &PathSegment, step: &PathStep<'_>) -> bool {
    match (segment, step) {
        (PathSegment::Wildcard, _) => true,
        (PathSegment::Child(name), PathStep::Key(key)) => name == key,
        (PathSegment::MultiProperty(names), PathStep::Key(key)) => names.iter().any(|n| n == key),
        (PathSegment::Index(expected), PathStep::Index(index)) => expected == index,
        _ => false,
    }
}

/// The set of ignore expressions applied during one comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles all expressions, failing on the first invalid one.
    pub fn parse<I, S>(expressions: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = expressions
            .into_iter()
            .map(|expr| IgnorePattern::parse(expr.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Adds one expression to the set.
    pub fn add(&mut self, expression: &str) -> Result<(), PathError> {
        let pattern = IgnorePattern::parse(expression)?;
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        Ok(())
    }

    /// Returns the first pattern matching the given path, if any.
    pub fn find_match(&self, steps: &[PathStep<'_>]) -> Option<&IgnorePattern> {
        self.patterns.iter().find(|pattern| pattern.matches(steps))
    }

    pub fn is_ignored(&self, steps: &[PathStep<'_>]) -> bool {
        self.find_match(steps).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnorePattern> {
        self.patterns.iter()
    }
}
