//! Validation limits, loadable from TOML.
//!
//! ```toml
//! max_key_length = 256
//! max_value_size = 1048576
//! key_pattern = "^[a-z]+:[0-9]+$"
//! validate_scan_prefix = true
//! ```
//!
//! Every field is optional and falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::adapters::{
    self, DEFAULT_MAX_KEY_LENGTH, DEFAULT_MAX_VALUE_SIZE, PREFIX_TARGET,
};
use crate::store::{KeyValidator, ValueValidator};
use crate::validators::string;

/// Limits applied by a [`ValidatedStore`](crate::store::ValidatedStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Maximum key length in characters
    pub max_key_length: usize,
    /// Maximum value size in bytes
    pub max_value_size: usize,
    /// Regex every key must match, if set
    pub key_pattern: Option<String>,
    /// Whether scan prefixes are length-checked like keys
    pub validate_scan_prefix: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            key_pattern: None,
            validate_scan_prefix: false,
        }
    }
}

impl ValidationConfig {
    /// Parse and check a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ValidationConfig =
            toml::from_str(source).map_err(|e| StoreError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Read, parse and check a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| StoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), ?config, "loaded validation config");
        Ok(config)
    }

    /// Reject limits that would make every operation fail.
    pub fn check(&self) -> Result<()> {
        if self.max_key_length == 0 {
            return Err(StoreError::Config("max_key_length must be at least 1".into()));
        }
        if self.max_value_size == 0 {
            return Err(StoreError::Config("max_value_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Key chain: non-empty, length limit, then the optional pattern.
    pub fn key_validator(&self) -> Result<KeyValidator> {
        let mut validators = vec![
            adapters::non_empty_key(),
            adapters::key_length(self.max_key_length),
        ];
        if let Some(pattern) = &self.key_pattern {
            let validator =
                adapters::key_pattern(pattern).map_err(|source| StoreError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            validators.push(validator);
        }
        Ok(KeyValidator::from_validators(validators))
    }

    pub fn value_validator(&self) -> ValueValidator {
        ValueValidator::new(vec![adapters::value_size(self.max_value_size)])
    }

    /// Prefix check used by `scan`, only when `validate_scan_prefix` is set.
    ///
    /// Prefixes get the length limit only: the empty prefix is legal and a
    /// prefix of a valid key need not match the key pattern.
    pub fn prefix_validator(&self) -> Option<KeyValidator> {
        if !self.validate_scan_prefix {
            return None;
        }
        let validator = KeyValidator::from_validators([
            string::max_length(self.max_key_length).with_name("prefix-length"),
        ])
        .with_target(PREFIX_TARGET);
        Some(validator)
    }
}
