//! Ignore expression parser.

use super::ast::{PathExpression, PathSegment};
use super::error::PathError;

/// Parser for ignore expression strings.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given expression.
    pub fn new(expression: &'a str) -> Self {
        Self {
            input: expression,
            position: 0,
        }
    }

    /// Parses the expression string into a `PathExpression`.
    pub fn parse(expression: &str) -> Result<PathExpression, PathError> {
        let mut parser = Parser::new(expression);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<PathExpression, PathError> {
        let mut segments = Vec::new();

        self.skip_whitespace();

        if self.peek() != Some('$') {
            return Err(PathError::InvalidSyntax {
                message: "Path expression must start with '$'".to_string(),
            });
        }
        self.next();
        segments.push(PathSegment::Root);

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('.') => {
                    self.next();
                    if self.peek() == Some('.') {
                        self.next();
                        segments.push(PathSegment::RecursiveDescent);
                        match self.peek() {
                            // the bracket is parsed as the next segment
                            Some('[') => {}
                            Some('*') => {
                                self.next();
                                segments.push(PathSegment::Wildcard);
                            }
                            None => {
                                return Err(PathError::UnexpectedEnd {
                                    expected: "property name, '*' or '[' after '..'".to_string(),
                                })
                            }
                            Some(_) => segments.push(PathSegment::Child(self.parse_identifier()?)),
                        }
                    } else if self.peek() == Some('*') {
                        self.next();
                        segments.push(PathSegment::Wildcard);
                    } else {
                        segments.push(PathSegment::Child(self.parse_identifier()?));
                    }
                }
                Some('[') => segments.push(self.parse_bracket_expression()?),
                Some(ch) => {
                    return Err(PathError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'.' or '['".to_string(),
                    })
                }
            }
        }

        Ok(PathExpression::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses an identifier (property name).
    fn parse_identifier(&mut self) -> Result<String, PathError> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' || ch == '$' || ch == '@' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(PathError::InvalidSyntax {
                message: "Expected identifier".to_string(),
            })
        } else {
            Ok(name)
        }
    }

    /// Parses bracket expression: [index], ['key'], ['a','b'], [*]
    fn parse_bracket_expression(&mut self) -> Result<PathSegment, PathError> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some('*') => {
                self.next();
                PathSegment::Wildcard
            }
            Some('\'') | Some('"') => {
                let mut properties = self.parse_bracket_strings()?;
                if properties.len() == 1 {
                    PathSegment::Child(properties.remove(0))
                } else {
                    PathSegment::MultiProperty(properties)
                }
            }
            Some('0'..='9') => PathSegment::Index(self.parse_index()?),
            Some('-') => {
                return Err(PathError::InvalidSyntax {
                    message: "Negative indices are not supported in ignore expressions"
                        .to_string(),
                })
            }
            _ => {
                return Err(PathError::InvalidSyntax {
                    message: "Invalid bracket expression".to_string(),
                })
            }
        };

        self.expect(']')?;
        Ok(segment)
    }

    /// Parses quoted string(s) inside brackets: 'key' or 'key1','key2'
    fn parse_bracket_strings(&mut self) -> Result<Vec<String>, PathError> {
        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            let quote = match self.peek() {
                Some(q @ ('\'' | '"')) => {
                    self.next();
                    q
                }
                _ => {
                    return Err(PathError::InvalidSyntax {
                        message: "Expected quoted property name".to_string(),
                    })
                }
            };

            let mut value = String::new();
            loop {
                match self.next() {
                    Some(ch) if ch == quote => break,
                    Some('\\') => match self.next() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('\\') => value.push('\\'),
                        Some('\'') => value.push('\''),
                        Some('"') => value.push('"'),
                        Some(_) | None => {
                            return Err(PathError::InvalidSyntax {
                                message: "Invalid escape sequence".to_string(),
                            })
                        }
                    },
                    Some(ch) => value.push(ch),
                    None => {
                        return Err(PathError::UnexpectedEnd {
                            expected: format!("closing quote '{}'", quote),
                        })
                    }
                }
            }
            properties.push(value);

            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.next();
            } else {
                break;
            }
        }
        Ok(properties)
    }

    fn parse_index(&mut self) -> Result<usize, PathError> {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.next();
            } else {
                break;
            }
        }
        digits.parse::<usize>().map_err(|_| PathError::InvalidSyntax {
            message: format!("Invalid index: {}", digits),
        })
    }
}
