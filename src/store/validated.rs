use std::collections::BTreeMap;

use crate::config::ValidationConfig;
use crate::error::Result;

use super::{KeyValidator, Store, ValueValidator};

/// A [`Store`] that validates keys and values before delegating.
///
/// Once a check fails the inner store is not called at all, so a rejected
/// operation has no effect. Only the first violated rule is reported; use
/// [`KeyValidator::validate_all`] for a full report.
///
/// `scan` prefixes are passed through unchecked unless a prefix validator is
/// opted into with [`with_prefix_validator`](Self::with_prefix_validator):
/// a prefix is looser than a key (the empty prefix is meaningful).
#[derive(Debug)]
pub struct ValidatedStore<S> {
    inner: S,
    keys: KeyValidator,
    values: ValueValidator,
    prefixes: Option<KeyValidator>,
}

impl<S: Store> ValidatedStore<S> {
    pub fn new(inner: S, keys: KeyValidator, values: ValueValidator) -> Self {
        ValidatedStore {
            inner,
            keys,
            values,
            prefixes: None,
        }
    }

    /// Non-empty keys up to 1024 characters, values up to 100 MiB.
    pub fn with_defaults(inner: S) -> Self {
        Self::new(inner, KeyValidator::with_defaults(), ValueValidator::with_defaults())
    }

    /// Build the validators described by `config`.
    pub fn from_config(inner: S, config: &ValidationConfig) -> Result<Self> {
        let keys = config.key_validator()?;
        let values = config.value_validator();
        let store = Self::new(inner, keys, values);
        Ok(match config.prefix_validator() {
            Some(prefixes) => store.with_prefix_validator(prefixes),
            None => store,
        })
    }

    /// Validate `scan` prefixes with `prefixes` as well.
    #[must_use]
    pub fn with_prefix_validator(mut self, prefixes: KeyValidator) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn key_validator(&self) -> &KeyValidator {
        &self.keys
    }

    pub fn value_validator(&self) -> &ValueValidator {
        &self.values
    }
}

impl<S: Store> Store for ValidatedStore<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.keys.validate(key)?;
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.keys.validate(key)?;
        self.values.validate(key, value)?;
        self.inner.put(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.keys.validate(key)?;
        self.inner.delete(key)
    }

    fn scan(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>> {
        if let Some(prefixes) = &self.prefixes {
            prefixes.validate(prefix)?;
        }
        self.inner.scan(prefix)
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}
