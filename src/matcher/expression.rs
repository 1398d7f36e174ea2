//! Matcher expression syntax embedded in expected values.
//!
//! An expected string of the form `@name(arg1, arg2)@` delegates the comparison
//! of that position to the matcher registered as `name`. Arguments are separated
//! by commas outside quotes and parentheses; surrounding single or double quotes
//! are removed. `@ignore@` is the reserved marker that accepts anything.

/// The reserved wildcard marker.
pub const IGNORE_PLACEHOLDER: &str = "@ignore@";

const IGNORE_MATCHER: &str = "ignore";

/// A parsed `@name(args)@` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherExpression {
    name: String,
    arguments: Vec<String>,
}

impl MatcherExpression {
    /// Parses `text` as a matcher expression.
    ///
    /// Returns `None` when the text is an ordinary string value.
    ///
    /// ```
    /// use treematch::matcher::MatcherExpression;
    ///
    /// let expr = MatcherExpression::parse("@equalsIgnoreCase('lorem ipsum')@").unwrap();
    /// assert_eq!(expr.name(), "equalsIgnoreCase");
    /// assert_eq!(expr.arguments(), ["lorem ipsum".to_string()]);
    ///
    /// assert!(MatcherExpression::parse("plain text").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let inner = trimmed.strip_prefix('@')?.strip_suffix('@')?;

        if inner == IGNORE_MATCHER {
            return Some(Self {
                name: IGNORE_MATCHER.to_string(),
                arguments: Vec::new(),
            });
        }

        let open = inner.find('(')?;
        let name = inner[..open].trim();
        let body = inner[open + 1..].strip_suffix(')')?;
        if !is_matcher_name(name) {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            arguments: split_arguments(body),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Returns true for `@ignore@` and `@ignore(...)@`.
    pub fn is_ignore(&self) -> bool {
        self.name == IGNORE_MATCHER
    }
}

/// Returns true if `text` is the ignore marker in any of its accepted forms.
pub fn is_ignore_marker(text: &str) -> bool {
    text.trim() == IGNORE_PLACEHOLDER
        || MatcherExpression::parse(text).is_some_and(|expr| expr.is_ignore())
}

fn is_matcher_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.')
}

fn split_arguments(body: &str) -> Vec<String> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let mut arguments = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for ch in body.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '(') => {
                depth += 1;
                current.push(ch);
            }
            (None, ')') => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            (None, ',') if depth == 0 => {
                arguments.push(clean_argument(&current));
                current.clear();
            }
            (None, c) => current.push(c),
        }
    }
    arguments.push(clean_argument(&current));
    arguments
}

fn clean_argument(raw: &str) -> String {
    let trimmed = raw.trim();
    for q in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(q) && trimmed.ends_with(q) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}
