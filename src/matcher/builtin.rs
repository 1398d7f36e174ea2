//! Built-in matchers available through `MatcherRegistry::with_defaults()`.

use super::{Matcher, MatcherContext, MatcherRegistry};
use crate::document::number::JsonNumber;
use regex::Regex;

/// Registers every built-in matcher under its expression name.
pub fn register_defaults(registry: &mut MatcherRegistry) {
    registry.register("equalsIgnoreCase", EqualsIgnoreCase);
    registry.register("contains", Contains { ignore_case: false });
    registry.register("containsIgnoreCase", Contains { ignore_case: true });
    registry.register("startsWith", StartsWith);
    registry.register("endsWith", EndsWith);
    registry.register("matches", Matches);
    registry.register("isNumber", IsNumber);
    registry.register("greaterThan", Compare { greater: true });
    registry.register("lowerThan", Compare { greater: false });
    registry.register("isEmpty", IsEmpty { expect_empty: true });
    registry.register("notEmpty", IsEmpty { expect_empty: false });
    registry.register("stringLength", StringLength);
    registry.register("ignore", Ignore);
}

fn single_argument<'a>(arguments: &'a [String]) -> Result<&'a str, String> {
    match arguments {
        [argument] => Ok(argument.as_str()),
        _ => Err(format!(
            "Matcher expects exactly 1 argument but got {}",
            arguments.len()
        )),
    }
}

fn no_arguments(arguments: &[String]) -> Result<(), String> {
    if arguments.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Matcher expects no arguments but got {}",
            arguments.len()
        ))
    }
}

fn parse_number(text: &str, role: &str) -> Result<JsonNumber, String> {
    JsonNumber::parse(text).ok_or_else(|| format!("{} value '{}' is not a number", role, text))
}

pub struct EqualsIgnoreCase;

impl Matcher for EqualsIgnoreCase {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let control = single_argument(arguments)?;
        if actual.to_lowercase() == control.to_lowercase() {
            Ok(())
        } else {
            Err(format!(
                "Received value is '{}', control value is '{}'",
                actual, control
            ))
        }
    }
}

pub struct Contains {
    ignore_case: bool,
}

impl Matcher for Contains {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let control = single_argument(arguments)?;
        let found = if self.ignore_case {
            actual.to_lowercase().contains(&control.to_lowercase())
        } else {
            actual.contains(control)
        };
        if found {
            Ok(())
        } else {
            Err(format!(
                "Received value '{}' does not contain '{}'",
                actual, control
            ))
        }
    }
}

pub struct StartsWith;

impl Matcher for StartsWith {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let control = single_argument(arguments)?;
        if actual.starts_with(control) {
            Ok(())
        } else {
            Err(format!(
                "Received value '{}' does not start with '{}'",
                actual, control
            ))
        }
    }
}

pub struct EndsWith;

impl Matcher for EndsWith {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let control = single_argument(arguments)?;
        if actual.ends_with(control) {
            Ok(())
        } else {
            Err(format!(
                "Received value '{}' does not end with '{}'",
                actual, control
            ))
        }
    }
}

/// Full-match regular expression check.
pub struct Matches;

impl Matcher for Matches {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let pattern = single_argument(arguments)?;
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|err| format!("Invalid regular expression '{}': {}", pattern, err))?;
        if regex.is_match(actual) {
            Ok(())
        } else {
            Err(format!(
                "Received value '{}' does not match pattern '{}'",
                actual, pattern
            ))
        }
    }
}

pub struct IsNumber;

impl Matcher for IsNumber {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        no_arguments(arguments)?;
        parse_number(actual, "Received").map(|_| ())
    }
}

/// `greaterThan` / `lowerThan`, compared by decimal value.
pub struct Compare {
    greater: bool,
}

impl Matcher for Compare {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let control_text = single_argument(arguments)?;
        let control = parse_number(control_text, "Control")?;
        let received = parse_number(actual, "Received")?;
        let (holds, relation) = if self.greater {
            (received > control, "greater")
        } else {
            (received < control, "lower")
        };
        if holds {
            Ok(())
        } else {
            Err(format!(
                "Received value '{}' is not {} than '{}'",
                actual, relation, control_text
            ))
        }
    }
}

pub struct IsEmpty {
    expect_empty: bool,
}

impl Matcher for IsEmpty {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        no_arguments(arguments)?;
        match (self.expect_empty, actual.is_empty()) {
            (true, true) | (false, false) => Ok(()),
            (true, false) => Err(format!("Received value '{}' is not empty", actual)),
            (false, true) => Err("Received value is empty".to_string()),
        }
    }
}

pub struct StringLength;

impl Matcher for StringLength {
    fn validate(
        &self,
        actual: &str,
        arguments: &[String],
        _: &MatcherContext<'_>,
    ) -> Result<(), String> {
        let control = single_argument(arguments)?;
        let expected: usize = control
            .trim()
            .parse()
            .map_err(|_| format!("Control value '{}' is not a valid length", control))?;
        let length = actual.chars().count();
        if length == expected {
            Ok(())
        } else {
            Err(format!(
                "Received value '{}' has length {}, control value is '{}'",
                actual, length, control
            ))
        }
    }
}

/// Accepts any value; backs `@ignore()@`.
pub struct Ignore;

impl Matcher for Ignore {
    fn validate(&self, _: &str, _: &[String], _: &MatcherContext<'_>) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn ctx() -> MatcherContext<'static> {
        MatcherContext::new("$['field']", "field")
    }

    #[test]
    fn test_equals_ignore_case() {
        assert!(EqualsIgnoreCase.validate("Lorem", &args(&["lorem"]), &ctx()).is_ok());
        let err = EqualsIgnoreCase
            .validate("Lorem", &args(&["lorem ipsum"]), &ctx())
            .unwrap_err();
        assert!(err.contains("'Lorem'"));
        assert!(err.contains("'lorem ipsum'"));
    }

    #[test]
    fn test_argument_count_is_checked() {
        assert!(EqualsIgnoreCase.validate("a", &[], &ctx()).is_err());
        assert!(EqualsIgnoreCase.validate("a", &args(&["a", "b"]), &ctx()).is_err());
        assert!(IsNumber.validate("1", &args(&["x"]), &ctx()).is_err());
    }

    #[test]
    fn test_contains() {
        let plain = Contains { ignore_case: false };
        let folded = Contains { ignore_case: true };
        assert!(plain.validate("Hello World", &args(&["World"]), &ctx()).is_ok());
        assert!(plain.validate("Hello World", &args(&["world"]), &ctx()).is_err());
        assert!(folded.validate("Hello World", &args(&["world"]), &ctx()).is_ok());
    }

    #[test]
    fn test_starts_and_ends_with() {
        assert!(StartsWith.validate("x123", &args(&["x"]), &ctx()).is_ok());
        assert!(StartsWith.validate("x123", &args(&["1"]), &ctx()).is_err());
        assert!(EndsWith.validate("x123", &args(&["23"]), &ctx()).is_ok());
        assert!(EndsWith.validate("x123", &args(&["x"]), &ctx()).is_err());
    }

    #[test]
    fn test_matches_is_anchored() {
        assert!(Matches.validate("x123456789x", &args(&["x[0-9]+x"]), &ctx()).is_ok());
        assert!(Matches.validate("ax123x", &args(&["x[0-9]+x"]), &ctx()).is_err());
        let err = Matches.validate("a", &args(&["("]), &ctx()).unwrap_err();
        assert!(err.starts_with("Invalid regular expression"));
    }

    #[test]
    fn test_numeric_matchers() {
        assert!(IsNumber.validate("5.00", &[], &ctx()).is_ok());
        assert!(IsNumber.validate("five", &[], &ctx()).is_err());

        let greater = Compare { greater: true };
        let lower = Compare { greater: false };
        assert!(greater.validate("10", &args(&["9.99"]), &ctx()).is_ok());
        assert!(greater.validate("10", &args(&["10.0"]), &ctx()).is_err());
        assert!(lower.validate("-1", &args(&["0"]), &ctx()).is_ok());
        assert!(lower.validate("abc", &args(&["0"]), &ctx()).is_err());
    }

    #[test]
    fn test_empty_matchers() {
        let empty = IsEmpty { expect_empty: true };
        let not_empty = IsEmpty { expect_empty: false };
        assert!(empty.validate("", &[], &ctx()).is_ok());
        assert!(empty.validate("x", &[], &ctx()).is_err());
        assert!(not_empty.validate("x", &[], &ctx()).is_ok());
        assert!(not_empty.validate("", &[], &ctx()).is_err());
    }

    #[test]
    fn test_string_length_counts_chars() {
        assert!(StringLength.validate("héllo", &args(&["5"]), &ctx()).is_ok());
        assert!(StringLength.validate("hello", &args(&["4"]), &ctx()).is_err());
        assert!(StringLength.validate("hello", &args(&["many"]), &ctx()).is_err());
    }

    #[test]
    fn test_ignore_accepts_anything() {
        assert!(Ignore.validate("whatever", &args(&["x"]), &ctx()).is_ok());
    }
}
