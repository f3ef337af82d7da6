//! Adapters between the generic validator machinery and store operations.
//!
//! Keys go through a [`ValidatorChain<str>`]; values go through an ordered
//! list of [`ValueRule`]s, which see the key as well so limits can vary per
//! key.

use std::fmt;
use std::sync::Arc;

use crate::validator::{Context, StringValidator, ValidationError, ValidationResult, ValidatorChain};
use crate::validators::string;

/// Target path used for key checks.
pub const KEY_TARGET: &str = "key";

/// Target path used for value checks.
pub const VALUE_TARGET: &str = "value";

/// Target path used for scan prefix checks.
pub const PREFIX_TARGET: &str = "prefix";

/// Default maximum key length, in characters.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 1024;

/// Default maximum value size: 100 MiB.
pub const DEFAULT_MAX_VALUE_SIZE: usize = 100 * 1024 * 1024;

/// A check over a value, given the key it is stored under.
pub type ValueRule = Arc<dyn Fn(&str, &[u8], &Context) -> Result<(), ValidationError> + Send + Sync>;

/// Validates store keys with a chain, stopping at the first violation.
#[derive(Debug, Clone)]
pub struct KeyValidator {
    chain: ValidatorChain<str>,
    target: String,
}

impl KeyValidator {
    pub fn new(chain: ValidatorChain<str>) -> Self {
        KeyValidator {
            chain,
            target: KEY_TARGET.to_string(),
        }
    }

    /// Build from individual validators, run in the given order.
    pub fn from_validators<I>(validators: I) -> Self
    where
        I: IntoIterator<Item = StringValidator>,
    {
        Self::new(validators.into_iter().collect())
    }

    /// Report violations under `target` instead of `"key"`.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Non-empty key of at most [`DEFAULT_MAX_KEY_LENGTH`] characters.
    pub fn with_defaults() -> Self {
        Self::from_validators(default_key_validators())
    }

    /// Check `key`, returning the first violated rule.
    pub fn validate(&self, key: &str) -> Result<(), ValidationError> {
        self.chain.validate_first(key, &Context::new(self.target.as_str()))
    }

    /// Check `key` against every rule and report all violations.
    pub fn validate_all(&self, key: &str) -> ValidationResult {
        self.chain.validate(key, &Context::new(self.target.as_str()))
    }

    pub fn chain(&self) -> &ValidatorChain<str> {
        &self.chain
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self::new(ValidatorChain::new())
    }
}

/// Validates store values with an ordered list of rules.
#[derive(Clone, Default)]
pub struct ValueValidator {
    rules: Vec<ValueRule>,
}

impl ValueValidator {
    pub fn new(rules: Vec<ValueRule>) -> Self {
        ValueValidator { rules }
    }

    /// Values of at most [`DEFAULT_MAX_VALUE_SIZE`] bytes.
    pub fn with_defaults() -> Self {
        Self::new(default_value_rules())
    }

    /// Append a rule.
    pub fn add(&mut self, rule: ValueRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Check `value` stored under `key`, returning the first violated rule.
    pub fn validate(&self, key: &str, value: &[u8]) -> Result<(), ValidationError> {
        let ctx = value_context(key);
        for rule in &self.rules {
            rule(key, value, &ctx)?;
        }
        Ok(())
    }

    /// Check `value` against every rule and report all violations.
    pub fn validate_all(&self, key: &str, value: &[u8]) -> ValidationResult {
        let ctx = value_context(key);
        self.rules
            .iter()
            .filter_map(|rule| rule(key, value, &ctx).err())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for ValueValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueValidator")
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn value_context(key: &str) -> Context {
    Context::new(VALUE_TARGET).with_metadata("key", key)
}

pub fn non_empty_key() -> StringValidator {
    string::not_empty().with_name("non-empty-key")
}

pub fn key_length(max: usize) -> StringValidator {
    string::max_length(max).with_name("key-length")
}

pub fn key_pattern(pattern: &str) -> Result<StringValidator, regex::Error> {
    Ok(string::pattern(pattern)?.with_name("key-pattern"))
}

/// Code reported by [`value_size`].
pub const VALUE_TOO_LARGE: &str = "value-too-large";

/// Rejects values larger than `max_size` bytes.
///
/// The rejected value is echoed as its length.
pub fn value_size(max_size: usize) -> ValueRule {
    Arc::new(move |key: &str, value: &[u8], ctx: &Context| {
        if value.len() > max_size {
            let mut err = ValidationError::new(
                ctx.target(),
                value.len(),
                format!("value too large: maximum {} bytes, got {}", max_size, value.len()),
            );
            err.with_code(VALUE_TOO_LARGE)
                .with_metadata("max-size", max_size)
                .with_metadata("actual-size", value.len())
                .with_metadata("key", key);
            return Err(err);
        }
        Ok(())
    })
}

/// Rejects values for which `predicate` returns false.
pub fn value_content<F>(predicate: F, message: impl Into<String>) -> ValueRule
where
    F: Fn(&[u8]) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Arc::new(move |key: &str, value: &[u8], ctx: &Context| {
        if !predicate(value) {
            let mut err = ValidationError::new(
                ctx.target(),
                String::from_utf8_lossy(value).into_owned(),
                format!("value validation failed: {}", message),
            );
            err.with_code("value-content-invalid")
                .with_metadata("key", key);
            return Err(err);
        }
        Ok(())
    })
}

pub fn default_key_validators() -> Vec<StringValidator> {
    vec![non_empty_key(), key_length(DEFAULT_MAX_KEY_LENGTH)]
}

pub fn default_value_rules() -> Vec<ValueRule> {
    vec![value_size(DEFAULT_MAX_VALUE_SIZE)]
}
