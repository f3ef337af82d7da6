use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-call state handed to every validator.
///
/// Identifies the field being checked (the target path, e.g. `"key"` or
/// `"value"`) plus a metadata bag validators may consult. A context is never
/// mutated once built: [`Context::with_metadata`] returns a fresh copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Field being validated
    target: String,
    /// Ambient data for validators (e.g. the key a value belongs to)
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl Context {
    /// Create a context for `target` with an empty metadata bag.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Returns a new context carrying one more metadata entry.
    ///
    /// The receiver is left untouched. An existing entry under `key` is
    /// replaced in the returned copy.
    #[must_use]
    pub fn with_metadata(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut metadata = self.metadata.clone();
        metadata.insert(key.into(), value.into());
        Self {
            target: self.target.clone(),
            metadata,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Look up a single metadata entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}
