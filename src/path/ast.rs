//! Abstract syntax tree types for ignore expressions.

/// A segment in an ignore expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Root node ($)
    Root,
    /// Named child (.property or ['property'])
    Child(String),
    /// Array index ([0])
    Index(usize),
    /// Wildcard (* or [*]) - exactly one key or index
    Wildcard,
    /// Recursive descent (..) - zero or more intermediate segments
    RecursiveDescent,
    /// Any of several properties (['prop1','prop2'])
    MultiProperty(Vec<String>),
}

/// A parsed ignore expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    /// Segments that make up the path, starting with `Root`.
    pub segments: Vec<PathSegment>,
}

impl PathExpression {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}
