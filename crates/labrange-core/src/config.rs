//! Classifier configuration.
//!
//! A TOML file where every field is optional:
//!
//! ```toml
//! ranges = "custom_ranges.csv"      # relative to this file
//! missing_tokens = ["#N/A", "N/A", "NA"]
//! excluded_patterns = ["EGFR"]
//! ```
//!
//! Unset fields fall back to the built-in behavior: the embedded range
//! table, `#N/A` / `N/A` as missing tokens, and eGFR excluded.

use std::path::{Path, PathBuf};

use labrange_model::MissingTokens;
use labrange_standards::{RangeTable, StandardsError, load_path};
use regex::RegexBuilder;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::classifier::{ClassifierOptions, Exclusion, RangeClassifier};

/// Errors raised while loading configuration or building a classifier.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid excluded pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Ranges(#[from] StandardsError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Range table file (`.csv` or `.json`). Embedded table when unset.
    pub ranges: Option<PathBuf>,
    /// Replaces the default missing tokens when set.
    pub missing_tokens: Option<Vec<String>>,
    /// Case-insensitive regular expressions. Replaces the default eGFR
    /// exclusion when set.
    pub excluded_patterns: Option<Vec<String>>,
}

impl ClassifierConfig {
    /// Read a config file. A relative `ranges` path is resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: ClassifierConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
        if let (Some(ranges), Some(dir)) = (config.ranges.as_mut(), path.parent()) {
            if ranges.is_relative() {
                *ranges = dir.join(&*ranges);
            }
        }
        debug!(path = %path.display(), "loaded classifier config");
        Ok(config)
    }

    #[must_use]
    pub fn with_ranges(mut self, ranges: Option<PathBuf>) -> Self {
        if ranges.is_some() {
            self.ranges = ranges;
        }
        self
    }

    pub fn options(&self) -> Result<ClassifierOptions, ConfigError> {
        let defaults = ClassifierOptions::default();
        let missing_tokens = match &self.missing_tokens {
            Some(tokens) => MissingTokens::new(tokens),
            None => defaults.missing_tokens,
        };
        let exclusions = match &self.excluded_patterns {
            Some(patterns) => patterns
                .iter()
                .map(String::as_str)
                .map(compile_exclusion)
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.exclusions,
        };
        Ok(ClassifierOptions {
            missing_tokens,
            exclusions,
        })
    }

    pub fn table(&self) -> Result<RangeTable, ConfigError> {
        let table = match &self.ranges {
            Some(path) => load_path(path)?,
            None => RangeTable::embedded()?,
        };
        Ok(table)
    }

    pub fn build(&self) -> Result<RangeClassifier, ConfigError> {
        let options = self.options()?;
        let table = self.table()?;
        Ok(RangeClassifier::with_options(table, options))
    }
}

fn compile_exclusion(pattern: &str) -> Result<Exclusion, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(Exclusion::Pattern)
        .map_err(|source| ConfigError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_parses_to_defaults() {
        let config: ClassifierConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClassifierConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ClassifierConfig>("colour = \"red\"").is_err());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let config = ClassifierConfig {
            excluded_patterns: Some(vec!["(unclosed".to_string()]),
            ..ClassifierConfig::default()
        };
        let err = config.options().unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn cli_ranges_override_config() {
        let config = ClassifierConfig {
            ranges: Some(PathBuf::from("a.csv")),
            ..ClassifierConfig::default()
        };
        assert_eq!(
            config.clone().with_ranges(Some(PathBuf::from("b.csv"))).ranges,
            Some(PathBuf::from("b.csv"))
        );
        assert_eq!(config.with_ranges(None).ranges, Some(PathBuf::from("a.csv")));
    }
}
