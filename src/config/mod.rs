//! Configuration system for treematch.
//!
//! Settings are read from `~/.config/treematch/config.toml` and can be
//! overridden from the command line. Every field is optional in the file.
//!
//! # Example
//!
//! ```
//! use treematch::config::Config;
//!
//! let config: Config = toml::from_str(r#"
//!     strict = false
//!     ignore_expressions = ["$..timestamp"]
//! "#).unwrap();
//!
//! assert!(!config.strict);
//! assert_eq!(config.log_level, "warn");
//!
//! let mode = config.mode().unwrap();
//! assert!(!mode.check_array_order());
//! ```

use crate::compare::ModeConfig;
use crate::path::PathError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the treematch application.
///
/// # Fields
///
/// * `strict` - Exact key sets and element counts (default: true)
/// * `check_array_order` - Compare arrays positionally; unset follows `strict`
/// * `ignore_expressions` - Paths excluded from comparison (default: none)
/// * `log_level` - Default tracing filter level (default: "warn")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Exact key sets and element counts
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Compare arrays positionally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_array_order: Option<bool>,

    /// Ignore expressions such as `$..timestamp`
    #[serde(default)]
    pub ignore_expressions: Vec<String>,

    /// Default log level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_strict() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            check_array_order: None,
            ignore_expressions: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treematch/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treematch");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring config file {}: {:#}", config_path.display(), err);
                Self::default()
            }
        }
    }

    /// Loads configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this structure.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Builds the comparison mode described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first ignore expression that fails to parse.
    pub fn mode(&self) -> Result<ModeConfig, PathError> {
        ModeConfig::new(self.strict)
            .with_array_order_setting(self.check_array_order)
            .with_ignore_expressions(&self.ignore_expressions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.strict);
        assert_eq!(config.check_array_order, None);
        assert!(config.ignore_expressions.is_empty());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_mode_carries_settings() {
        let config = Config {
            strict: true,
            check_array_order: Some(false),
            ignore_expressions: vec!["$.id".to_string(), "$..ts".to_string()],
            ..Config::default()
        };
        let mode = config.mode().unwrap();
        assert!(mode.is_strict());
        assert!(!mode.check_array_order());
        assert_eq!(mode.ignore_rules().len(), 2);
    }

    #[test]
    fn test_mode_rejects_bad_expression() {
        let config = Config {
            ignore_expressions: vec!["$.items[1:2]".to_string()],
            ..Config::default()
        };
        assert!(config.mode().is_err());
    }

    #[test]
    fn test_serialization_skips_unset_array_order() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert!(!text.contains("check_array_order"));
        assert!(text.contains("strict = true"));
    }
}
