//! Error types for ignore expression parsing.

use thiserror::Error;

/// Errors that can occur while parsing an ignore expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Unexpected token at a specific position.
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    #[error("Invalid path expression syntax: {message}")]
    InvalidSyntax { message: String },
    /// Wraps any of the above with the offending expression.
    #[error("Invalid ignore expression '{expression}': {source}")]
    InvalidExpression {
        expression: String,
        #[source]
        source: Box<PathError>,
    },
}
