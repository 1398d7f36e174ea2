//! Addressed comparison positions.
//!
//! A `PathNode` pairs the actual and expected values found at one position of
//! the two documents. Children borrow their parent, so the chain of nodes from
//! a leaf back to the root lives on the comparison call stack and is dropped as
//! soon as the subtree has been validated.
//!
//! # Example
//!
//! ```
//! use treematch::document::parse_json;
//! use treematch::path::{PathNode, Selector};
//!
//! let actual = parse_json(r#"{"items": [1, 2]}"#).unwrap();
//! let expected = actual.clone();
//! let root = PathNode::root(&actual, &expected);
//! let items = root.child(Selector::Key("items"), None, &expected);
//! let second = items.child(Selector::Index(1), None, &expected);
//!
//! assert_eq!(second.render_path(), "$['items'][1]");
//! assert_eq!(items.name(), "items");
//! ```

use crate::document::node::JsonValue;
use std::fmt;

/// Position of a node within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

/// One non-root segment of a rendered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep<'a> {
    Key(&'a str),
    Index(usize),
}

/// A single comparison unit: one position in the paired traversal.
#[derive(Debug, Clone, Copy)]
pub struct PathNode<'a> {
    selector: Selector<'a>,
    actual: Option<&'a JsonValue>,
    expected: &'a JsonValue,
    parent: Option<&'a PathNode<'a>>,
}

impl<'a> PathNode<'a> {
    /// Creates the root node wrapping both top-level documents.
    pub fn root(actual: &'a JsonValue, expected: &'a JsonValue) -> Self {
        Self {
            selector: Selector::Root,
            actual: Some(actual),
            expected,
            parent: None,
        }
    }

    /// Creates a descendant node.
    ///
    /// `actual` is `None` when the actual document has nothing at this
    /// position.
    pub fn child<'b>(
        &'b self,
        selector: Selector<'b>,
        actual: Option<&'b JsonValue>,
        expected: &'b JsonValue,
    ) -> PathNode<'b> {
        PathNode {
            selector,
            actual,
            expected,
            parent: Some(self),
        }
    }

    pub fn selector(&self) -> Selector<'a> {
        self.selector
    }

    pub fn actual(&self) -> Option<&'a JsonValue> {
        self.actual
    }

    pub fn expected(&self) -> &'a JsonValue {
        self.expected
    }

    pub fn parent(&self) -> Option<&'a PathNode<'a>> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the node's own fragment: `$`, the bare key, or `[N]`.
    pub fn name(&self) -> String {
        match self.selector {
            Selector::Root => "$".to_string(),
            Selector::Key(key) => key.to_string(),
            Selector::Index(index) => format!("[{}]", index),
        }
    }

    /// Renders the full path from the root, e.g. `$['greetings'][1]['text']`.
    ///
    /// Quotes and backslashes in keys are escaped so the result parses back
    /// as an ignore expression naming the same node.
    pub fn render_path(&self) -> String {
        let mut path = String::from("$");
        for step in self.steps() {
            match step {
                PathStep::Key(key) => {
                    path.push_str("['");
                    for c in key.chars() {
                        match c {
                            '\\' => path.push_str("\\\\"),
                            '\'' => path.push_str("\\'"),
                            _ => path.push(c),
                        }
                    }
                    path.push_str("']");
                }
                PathStep::Index(index) => {
                    path.push('[');
                    path.push_str(&index.to_string());
                    path.push(']');
                }
            }
        }
        path
    }

    /// Returns the path segments from the root (exclusive) down to this node.
    pub fn steps(&self) -> Vec<PathStep<'a>> {
        let mut steps = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            match node.selector {
                Selector::Root => {}
                Selector::Key(key) => steps.push(PathStep::Key(key)),
                Selector::Index(index) => steps.push(PathStep::Index(index)),
            }
            current = node.parent;
        }
        steps.reverse();
        steps
    }
}

impl fmt::Display for PathNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_dollar() {
        let value = JsonValue::Null;
        let root = PathNode::root(&value, &value);
        assert_eq!(root.render_path(), "$");
        assert_eq!(root.name(), "$");
        assert!(root.is_root());
        assert!(root.steps().is_empty());
    }

    #[test]
    fn test_nested_rendering() {
        let value = JsonValue::Null;
        let root = PathNode::root(&value, &value);
        let greetings = root.child(Selector::Key("greetings"), None, &value);
        let first = greetings.child(Selector::Index(0), None, &value);
        let text = first.child(Selector::Key("text"), Some(&value), &value);

        assert_eq!(greetings.render_path(), "$['greetings']");
        assert_eq!(first.render_path(), "$['greetings'][0]");
        assert_eq!(text.render_path(), "$['greetings'][0]['text']");
        assert_eq!(first.name(), "[0]");
        assert_eq!(text.name(), "text");
        assert_eq!(
            text.steps(),
            vec![
                PathStep::Key("greetings"),
                PathStep::Index(0),
                PathStep::Key("text")
            ]
        );
    }

    #[test]
    fn test_quotes_and_backslashes_are_escaped() {
        let value = JsonValue::Null;
        let root = PathNode::root(&value, &value);
        let quoted = root.child(Selector::Key("it's"), None, &value);
        let slashed = quoted.child(Selector::Key("a\\b"), None, &value);

        assert_eq!(quoted.render_path(), "$['it\\'s']");
        assert_eq!(slashed.render_path(), "$['it\\'s']['a\\\\b']");

        let rules = crate::path::IgnoreRules::parse([slashed.render_path()]).unwrap();
        assert!(rules.is_ignored(&slashed.steps()));
        assert!(!rules.is_ignored(&quoted.steps()));
    }

    #[test]
    fn test_child_keeps_values() {
        let actual = JsonValue::from("a");
        let expected = JsonValue::from("b");
        let null = JsonValue::Null;
        let root = PathNode::root(&null, &null);
        let child = root.child(Selector::Key("k"), Some(&actual), &expected);
        assert_eq!(child.actual(), Some(&actual));
        assert_eq!(child.expected(), &expected);
        assert!(child.parent().is_some());
        assert_eq!(child.to_string(), "$['k']");
    }

    #[test]
    fn test_missing_actual() {
        let expected = JsonValue::from(1i64);
        let root = PathNode::root(&expected, &expected);
        let child = root.child(Selector::Index(3), None, &expected);
        assert!(child.actual().is_none());
    }
}
