//! Validation failure type.

use std::fmt;
use thiserror::Error;

/// Category of a validation failure.
///
/// Callers normally only look at the message; the category exists so that
/// tests and tooling can tell structural problems from value problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Kind disagreement, entry count disagreement, missing key or array item.
    StructuralMismatch,
    /// Same kind, different value.
    ValueMismatch,
    /// A matcher rejected the value or could not be resolved.
    MatcherFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::StructuralMismatch => "structural mismatch",
            FailureKind::ValueMismatch => "value mismatch",
            FailureKind::MatcherFailure => "matcher failure",
        };
        f.write_str(name)
    }
}

/// The first mismatch found while comparing two documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    kind: FailureKind,
    path: String,
    message: String,
    expected: Option<String>,
    actual: Option<String>,
    #[source]
    cause: Option<Box<ValidationFailure>>,
}

impl ValidationFailure {
    pub fn new(kind: FailureKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            expected: None,
            actual: None,
            cause: None,
        }
    }

    pub fn structural(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::StructuralMismatch, path, message)
    }

    pub fn value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::ValueMismatch, path, message)
    }

    pub fn matcher(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::MatcherFailure, path, message)
    }

    /// Attaches the two conflicting raw values.
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    /// Attaches the nested failure that led to this one.
    pub fn with_cause(mut self, cause: ValidationFailure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Rendered path of the node where the mismatch was detected.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }

    pub fn cause(&self) -> Option<&ValidationFailure> {
        self.cause.as_deref()
    }
}

/// Formats the standard `"{base}, expected '{e}' but was '{a}'"` message.
pub(crate) fn mismatch_message(base: &str, expected: &str, actual: &str) -> String {
    format!("{}, expected '{}' but was '{}'", base, expected, actual)
}
