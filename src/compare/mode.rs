//! Comparison mode configuration.
//!
//! # Example
//!
//! ```
//! use treematch::compare::ModeConfig;
//!
//! let config = ModeConfig::lenient()
//!     .with_array_order(true)
//!     .with_ignore_expressions(["$..timestamp"])
//!     .unwrap();
//!
//! assert!(!config.is_strict());
//! assert!(config.check_array_order());
//! assert_eq!(config.ignore_rules().len(), 1);
//! ```

use crate::path::{IgnoreRules, PathError};

/// Mode flags and ignore rules for one comparison.
///
/// `check_array_order` is optional; when unset it resolves to the value of
/// `strict`. Ignore expressions are compiled when they are added, so a
/// `ModeConfig` always holds valid patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeConfig {
    strict: bool,
    check_array_order: Option<bool>,
    ignore: IgnoreRules,
}

impl Default for ModeConfig {
    /// Strict mode, array order following `strict`, nothing ignored.
    fn default() -> Self {
        Self::new(true)
    }
}

impl ModeConfig {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            check_array_order: None,
            ignore: IgnoreRules::new(),
        }
    }

    /// Exact key sets and element counts.
    pub fn strict() -> Self {
        Self::new(true)
    }

    /// Expected document is a subset of the actual one.
    pub fn lenient() -> Self {
        Self::new(false)
    }

    /// Sets array order checking explicitly, independent of `strict`.
    pub fn with_array_order(mut self, check_array_order: bool) -> Self {
        self.check_array_order = Some(check_array_order);
        self
    }

    /// Sets the optional array order flag; `None` falls back to `strict`.
    pub fn with_array_order_setting(mut self, check_array_order: Option<bool>) -> Self {
        self.check_array_order = check_array_order;
        self
    }

    /// Compiles and adds ignore expressions.
    ///
    /// # Errors
    ///
    /// Returns the first expression that fails to parse.
    pub fn with_ignore_expressions<I, S>(mut self, expressions: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for expression in expressions {
            self.ignore.add(expression.as_ref())?;
        }
        Ok(self)
    }

    pub fn with_ignore_rules(mut self, rules: IgnoreRules) -> Self {
        self.ignore = rules;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Effective array order flag.
    pub fn check_array_order(&self) -> bool {
        self.check_array_order.unwrap_or(self.strict)
    }

    /// The explicitly configured array order flag, if any.
    pub fn array_order_setting(&self) -> Option<bool> {
        self.check_array_order
    }

    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.ignore
    }
}
