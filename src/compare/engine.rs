//! Recursive structural comparison.

use super::error::{mismatch_message, ValidationFailure};
use super::mode::ModeConfig;
use crate::document::node::{JsonValue, ValueKind};
use crate::matcher::{is_ignore_marker, MatcherContext, MatcherExpression, MatcherResolver};
use crate::path::{PathNode, PathStep, Selector};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Whether failures are reported or only probed for.
///
/// Unordered array matching tries candidates that are expected to fail;
/// those attempts must not log as if they were real mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Report,
    Probe,
}

/// Compares an actual document against an expected one.
///
/// A `Comparator` holds no state of its own beyond the borrowed mode and
/// matcher resolver, so one instance can validate any number of documents.
pub struct Comparator<'c> {
    config: &'c ModeConfig,
    matchers: &'c dyn MatcherResolver,
}

impl<'c> Comparator<'c> {
    pub fn new(config: &'c ModeConfig, matchers: &'c dyn MatcherResolver) -> Self {
        Self { config, matchers }
    }

    pub fn config(&self) -> &ModeConfig {
        self.config
    }

    /// Validates the subtree rooted at `node`, stopping at the first mismatch.
    pub fn validate(&self, node: &PathNode<'_>) -> Result<(), ValidationFailure> {
        let result = self.validate_node(node, Pass::Report);
        match &result {
            Ok(()) => info!(path = %node.render_path(), "JSON validation successful"),
            Err(failure) => debug!(
                path = failure.path(),
                kind = %failure.kind(),
                "JSON validation failed: {}",
                failure
            ),
        }
        result
    }

    fn validate_node(&self, node: &PathNode<'_>, pass: Pass) -> Result<(), ValidationFailure> {
        if self.is_ignored(node, pass) {
            return Ok(());
        }

        let expected = node.expected();
        if let JsonValue::String(text) = expected {
            if let Some(expression) = MatcherExpression::parse(text) {
                return self.validate_matcher(node, &expression, pass);
            }
        }

        let actual = match node.actual() {
            Some(actual) => actual,
            None => return Err(missing_entry(node)),
        };

        match (expected, actual) {
            (JsonValue::Null, JsonValue::Null) => Ok(()),
            (JsonValue::Null, _) | (_, JsonValue::Null) => {
                Err(values_not_equal(node, expected, actual))
            }
            (JsonValue::Object(expected_fields), JsonValue::Object(actual_fields)) => {
                self.validate_object(node, expected_fields, actual_fields, pass)
            }
            (JsonValue::Array(expected_items), JsonValue::Array(actual_items)) => {
                self.validate_array(node, expected_items, actual_items, pass)
            }
            _ if expected.kind() != actual.kind() => {
                Err(type_mismatch(node, expected.kind(), actual.kind()))
            }
            _ if expected == actual => Ok(()),
            _ => Err(values_not_equal(node, expected, actual)),
        }
    }

    /// Ignore patterns and the `@ignore@` marker both short-circuit a node.
    fn is_ignored(&self, node: &PathNode<'_>, pass: Pass) -> bool {
        let rules = self.config.ignore_rules();
        if !rules.is_empty() {
            if let Some(pattern) = rules.find_match(&node.steps()) {
                if pass == Pass::Report {
                    debug!(
                        "JSON entry '{}' is ignored by expression '{}'",
                        node.render_path(),
                        pattern.expression()
                    );
                }
                return true;
            }
        }

        match node.expected() {
            JsonValue::String(text) if is_ignore_marker(text) => {
                if pass == Pass::Report {
                    debug!("JSON entry '{}' is ignored by placeholder", node.render_path());
                }
                true
            }
            _ => false,
        }
    }

    /// Whether a child of `node` is excluded from strict entry counting.
    ///
    /// An entry counts unless an ignore rule matches its path or the expected
    /// side holds the `@ignore@` marker at that position.
    fn is_uncounted(
        &self,
        node: &PathNode<'_>,
        step: PathStep<'_>,
        expected: Option<&JsonValue>,
    ) -> bool {
        if let Some(JsonValue::String(text)) = expected {
            if is_ignore_marker(text) {
                return true;
            }
        }
        let rules = self.config.ignore_rules();
        if rules.is_empty() {
            return false;
        }
        let mut steps = node.steps();
        steps.push(step);
        rules.is_ignored(&steps)
    }

    fn same_key_count(
        &self,
        node: &PathNode<'_>,
        expected: &IndexMap<String, JsonValue>,
        actual: &IndexMap<String, JsonValue>,
    ) -> bool {
        let counted = |key: &str| {
            !self.is_uncounted(node, PathStep::Key(key), expected.get(key))
        };
        let expected_count = expected.keys().filter(|key| counted(key.as_str())).count();
        let actual_count = actual.keys().filter(|key| counted(key.as_str())).count();
        expected_count == actual_count
    }

    fn same_item_count(
        &self,
        node: &PathNode<'_>,
        expected: &[JsonValue],
        actual: &[JsonValue],
    ) -> bool {
        let counted = |index: &usize| {
            !self.is_uncounted(node, PathStep::Index(*index), expected.get(*index))
        };
        let expected_count = (0..expected.len()).filter(counted).count();
        let actual_count = (0..actual.len()).filter(counted).count();
        expected_count == actual_count
    }

    fn validate_matcher(
        &self,
        node: &PathNode<'_>,
        expression: &MatcherExpression,
        pass: Pass,
    ) -> Result<(), ValidationFailure> {
        let path = node.render_path();
        let name = expression.name();
        let matcher = self.matchers.resolve(name).ok_or_else(|| {
            ValidationFailure::matcher(path.clone(), format!("unsupported matcher: {}", name))
        })?;

        let actual_text = node
            .actual()
            .map(JsonValue::to_message_text)
            .unwrap_or_else(|| "null".to_string());
        let field = node.name();
        let context = MatcherContext::new(&path, &field);

        if pass == Pass::Report {
            debug!("Validating JSON entry '{}' with matcher '{}'", path, name);
        }

        matcher
            .validate(&actual_text, expression.arguments(), &context)
            .map_err(|detail| {
                let message = format!(
                    "Matcher '{}' failed for entry '{}' with value '{}' and arguments [{}]: {}",
                    name,
                    path,
                    actual_text,
                    argument_list(expression.arguments()),
                    detail
                );
                ValidationFailure::matcher(path.clone(), message)
                    .with_values(node.expected().to_message_text(), actual_text.clone())
            })
    }

    fn validate_object(
        &self,
        node: &PathNode<'_>,
        expected: &IndexMap<String, JsonValue>,
        actual: &IndexMap<String, JsonValue>,
        pass: Pass,
    ) -> Result<(), ValidationFailure> {
        if self.config.is_strict() && !self.same_key_count(node, expected, actual) {
            let expected_keys = key_list(expected);
            let actual_keys = key_list(actual);
            let path = node.render_path();
            let base = format!("Number of entries is not equal in element: '{}'", path);
            return Err(ValidationFailure::structural(
                path,
                mismatch_message(&base, &expected_keys, &actual_keys),
            )
            .with_values(expected_keys, actual_keys));
        }

        for (key, expected_value) in expected {
            let child = node.child(Selector::Key(key), actual.get(key), expected_value);
            self.validate_node(&child, pass)?;
        }
        Ok(())
    }

    fn validate_array(
        &self,
        node: &PathNode<'_>,
        expected: &[JsonValue],
        actual: &[JsonValue],
        pass: Pass,
    ) -> Result<(), ValidationFailure> {
        if pass == Pass::Report {
            debug!(
                "Validating JSON array '{}' containing {} entries",
                node.render_path(),
                expected.len()
            );
        }

        if self.config.is_strict() && !self.same_item_count(node, expected, actual) {
            let expected_text = node.expected().to_string();
            let actual_text = array_text(actual);
            let path = node.render_path();
            let base = format!("Number of entries is not equal in element: '{}'", path);
            return Err(ValidationFailure::structural(
                path,
                mismatch_message(&base, &expected_text, &actual_text),
            )
            .with_values(expected_text, actual_text));
        }

        if self.config.check_array_order() {
            self.validate_ordered(node, expected, actual, pass)
        } else {
            self.validate_unordered(node, expected, actual, pass)
        }
    }

    fn validate_ordered(
        &self,
        node: &PathNode<'_>,
        expected: &[JsonValue],
        actual: &[JsonValue],
        pass: Pass,
    ) -> Result<(), ValidationFailure> {
        for (index, expected_item) in expected.iter().enumerate() {
            let actual_item = actual.get(index);
            let child = node.child(Selector::Index(index), actual_item, expected_item);
            let cause = match self.validate_node(&child, pass) {
                Ok(()) => continue,
                Err(cause) => cause,
            };

            // A missing position already carries the "item is missing" message.
            let Some(actual_item) = actual_item else {
                return Err(cause);
            };

            let path = node.render_path();
            let expected_text = expected_item.to_message_text();
            let actual_text = actual_item.to_message_text();
            let base = format!("Elements not equal for array '{}' at position {}", path, index);
            return Err(ValidationFailure::new(
                cause.kind(),
                path,
                mismatch_message(&base, &expected_text, &actual_text),
            )
            .with_values(expected_text, actual_text)
            .with_cause(cause));
        }
        Ok(())
    }

    fn validate_unordered(
        &self,
        node: &PathNode<'_>,
        expected: &[JsonValue],
        actual: &[JsonValue],
        pass: Pass,
    ) -> Result<(), ValidationFailure> {
        let strict = self.config.is_strict();
        // candidates[i]: actual positions that satisfy expected element i
        let mut candidates: Vec<Vec<usize>> = vec![Vec::new(); expected.len()];
        // owner[j]: expected element currently paired with actual element j
        let mut owner: Vec<Option<usize>> = vec![None; actual.len()];

        for (index, expected_item) in expected.iter().enumerate() {
            let placeholder = node.child(Selector::Index(index), None, expected_item);
            if self.is_ignored(&placeholder, pass) {
                continue;
            }

            let satisfies = |actual_item: &JsonValue| {
                let child = node.child(Selector::Index(index), Some(actual_item), expected_item);
                self.validate_node(&child, Pass::Probe).is_ok()
            };

            let found = if strict {
                candidates[index] = actual
                    .iter()
                    .enumerate()
                    .filter(|(_, actual_item)| satisfies(*actual_item))
                    .map(|(candidate, _)| candidate)
                    .collect();
                let mut visited = vec![false; actual.len()];
                augment(index, &candidates, &mut owner, &mut visited)
            } else {
                actual.iter().any(satisfies)
            };

            if !found {
                let path = node.render_path();
                let expected_text = expected_item.to_message_text();
                let actual_text = array_text(actual);
                return Err(ValidationFailure::structural(
                    path.clone(),
                    format!(
                        "An item in '{}' is missing, expected '{}' to be in '{}'",
                        path, expected_text, actual_text
                    ),
                )
                .with_values(expected_text, actual_text));
            }
        }
        Ok(())
    }
}

/// Tries to pair expected element `row` with an actual element, moving
/// earlier pairings to other candidates where needed (augmenting path).
fn augment(
    row: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &candidate in &candidates[row] {
        if visited[candidate] {
            continue;
        }
        visited[candidate] = true;
        let free = match owner[candidate] {
            None => true,
            Some(other) => augment(other, candidates, owner, visited),
        };
        if free {
            owner[candidate] = Some(row);
            return true;
        }
    }
    false
}

fn missing_entry(node: &PathNode<'_>) -> ValidationFailure {
    let path = node.render_path();
    let expected_text = node.expected().to_message_text();
    let parent = node.parent();

    match (node.selector(), parent.and_then(|p| p.actual())) {
        (Selector::Index(_), Some(JsonValue::Array(items))) => {
            let parent_path = parent.map(|p| p.render_path()).unwrap_or_default();
            let actual_text = array_text(items);
            ValidationFailure::structural(
                path,
                format!(
                    "An item in '{}' is missing, expected '{}' to be in '{}'",
                    parent_path, expected_text, actual_text
                ),
            )
            .with_values(expected_text, actual_text)
        }
        (Selector::Key(key), Some(JsonValue::Object(fields))) => {
            let actual_keys = key_list(fields);
            ValidationFailure::structural(
                path,
                format!(
                    "Missing JSON entry, expected '{}' to be in '{}'",
                    key, actual_keys
                ),
            )
            .with_values(expected_text, actual_keys)
        }
        _ => ValidationFailure::structural(
            path.clone(),
            format!("Missing JSON entry '{}'", path),
        ),
    }
}

fn type_mismatch(node: &PathNode<'_>, expected: ValueKind, actual: ValueKind) -> ValidationFailure {
    let path = node.render_path();
    let base = format!("Type mismatch for JSON entry '{}'", path);
    ValidationFailure::structural(
        path,
        mismatch_message(&base, expected.as_str(), actual.as_str()),
    )
    .with_values(expected.as_str(), actual.as_str())
}

fn values_not_equal(node: &PathNode<'_>, expected: &JsonValue, actual: &JsonValue) -> ValidationFailure {
    let path = node.render_path();
    let expected_text = expected.to_message_text();
    let actual_text = actual.to_message_text();
    let base = format!("Values not equal for entry: '{}'", path);
    ValidationFailure::value(path, mismatch_message(&base, &expected_text, &actual_text))
        .with_values(expected_text, actual_text)
}

/// Matcher arguments rendered as `'a', 'b'`.
fn argument_list(arguments: &[String]) -> String {
    arguments
        .iter()
        .map(|argument| format!("'{}'", argument))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keys rendered as `[a, b, c]`.
fn key_list(fields: &IndexMap<String, JsonValue>) -> String {
    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    format!("[{}]", keys.join(", "))
}

fn array_text(items: &[JsonValue]) -> String {
    JsonValue::Array(items.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::FailureKind;
    use crate::document::parse_json;
    use crate::matcher::MatcherRegistry;

    fn check(actual: &str, expected: &str, config: &ModeConfig) -> Result<(), ValidationFailure> {
        let actual = parse_json(actual).unwrap();
        let expected = parse_json(expected).unwrap();
        let registry = MatcherRegistry::with_defaults();
        let root = PathNode::root(&actual, &expected);
        Comparator::new(config, &registry).validate(&root)
    }

    #[test]
    fn test_identical_documents() {
        let doc = r#"{"a": [1, {"b": null}], "c": "x"}"#;
        assert!(check(doc, doc, &ModeConfig::strict()).is_ok());
    }

    #[test]
    fn test_null_against_value() {
        let err = check(r#"{"n": "x"}"#, r#"{"n": null}"#, &ModeConfig::strict()).unwrap_err();
        assert_eq!(
            err.message(),
            "Values not equal for entry: '$['n']', expected 'null' but was 'x'"
        );
        assert_eq!(err.kind(), FailureKind::ValueMismatch);
    }

    #[test]
    fn test_value_against_null() {
        let err = check(r#"{"n": null}"#, r#"{"n": 3}"#, &ModeConfig::strict()).unwrap_err();
        assert_eq!(
            err.message(),
            "Values not equal for entry: '$['n']', expected '3' but was 'null'"
        );
    }

    #[test]
    fn test_scalar_kind_mismatch() {
        let err = check(r#"{"n": "5"}"#, r#"{"n": 5}"#, &ModeConfig::strict()).unwrap_err();
        assert_eq!(
            err.message(),
            "Type mismatch for JSON entry '$['n']', expected 'Number' but was 'String'"
        );
        assert_eq!(err.kind(), FailureKind::StructuralMismatch);
    }

    #[test]
    fn test_object_count_message_lists_keys() {
        let err = check(r#"{"a": 1, "b": 2}"#, r#"{"a": 1}"#, &ModeConfig::strict()).unwrap_err();
        assert_eq!(
            err.message(),
            "Number of entries is not equal in element: '$', expected '[a]' but was '[a, b]'"
        );
    }

    #[test]
    fn test_same_count_different_keys() {
        let err = check(r#"{"a": 1, "c": 2}"#, r#"{"a": 1, "b": 2}"#, &ModeConfig::strict())
            .unwrap_err();
        assert_eq!(err.message(), "Missing JSON entry, expected 'b' to be in '[a, c]'");
        assert_eq!(err.path(), "$['b']");
    }

    #[test]
    fn test_ordered_failure_keeps_cause() {
        let err = check(r#"[{"a": 1}]"#, r#"[{"a": 2}]"#, &ModeConfig::strict()).unwrap_err();
        assert_eq!(
            err.message(),
            "Elements not equal for array '$' at position 0, expected '{\"a\":2}' but was '{\"a\":1}'"
        );
        let cause = err.cause().unwrap();
        assert_eq!(cause.path(), "$[0]['a']");
        assert_eq!(cause.kind(), FailureKind::ValueMismatch);
    }

    #[test]
    fn test_ordered_lenient_short_actual() {
        let config = ModeConfig::lenient().with_array_order(true);
        let err = check("[1]", "[1, 2]", &config).unwrap_err();
        assert_eq!(err.message(), "An item in '$' is missing, expected '2' to be in '[1]'");
    }

    #[test]
    fn test_strict_unordered_does_not_reuse_elements() {
        let config = ModeConfig::strict().with_array_order(false);
        assert!(check("[2, 1]", "[1, 2]", &config).is_ok());
        let err = check("[1, 2]", "[1, 1]", &config).unwrap_err();
        assert_eq!(err.message(), "An item in '$' is missing, expected '1' to be in '[1,2]'");
    }

    #[test]
    fn test_strict_unordered_moves_earlier_pairing() {
        let config = ModeConfig::strict().with_array_order(false);
        assert!(check(r#"["ab", "ac"]"#, r#"["@startsWith('a')@", "ab"]"#, &config).is_ok());
        let err = check(r#"["ab", "xy"]"#, r#"["@startsWith('a')@", "ab"]"#, &config)
            .unwrap_err();
        assert_eq!(
            err.message(),
            "An item in '$' is missing, expected 'ab' to be in '[\"ab\",\"xy\"]'"
        );
    }

    #[test]
    fn test_strict_counts_skip_ignore_marker() {
        let config = ModeConfig::strict();
        assert!(check(r#"{"a": 1}"#, r#"{"a": 1, "b": "@ignore@"}"#, &config).is_ok());
        assert!(check(r#"{"a": 1, "b": [2]}"#, r#"{"a": 1, "b": "@ignore@"}"#, &config).is_ok());
        assert!(check("[1]", r#"[1, "@ignore@"]"#, &config).is_ok());
        assert!(check(r#"{"a": 1, "c": 2}"#, r#"{"a": 1, "b": "@ignore@"}"#, &config).is_err());
    }

    #[test]
    fn test_lenient_unordered_reuses_elements() {
        assert!(check("[1, 2, 3]", "[1, 1]", &ModeConfig::lenient()).is_ok());
    }

    #[test]
    fn test_unsupported_matcher() {
        let err = check(r#"{"a": "x"}"#, r#"{"a": "@nope()@"}"#, &ModeConfig::strict())
            .unwrap_err();
        assert_eq!(err.message(), "unsupported matcher: nope");
        assert_eq!(err.kind(), FailureKind::MatcherFailure);
    }

    #[test]
    fn test_matcher_on_absent_value_sees_null() {
        let err = check("{}", r#"{"a": "@isEmpty()@"}"#, &ModeConfig::lenient()).unwrap_err();
        assert_eq!(
            err.message(),
            "Matcher 'isEmpty' failed for entry '$['a']' with value 'null' and arguments []: \
             Received value 'null' is not empty"
        );
        assert_eq!(err.actual(), Some("null"));
    }

    #[test]
    fn test_ignore_marker_accepts_absent_key() {
        assert!(check("{}", r#"{"a": "@ignore@"}"#, &ModeConfig::lenient()).is_ok());
    }
}
