//! Structured validation errors and their aggregate container.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category carried by every validation error.
pub const ERROR_TYPE: &str = "validation";

/// Code used until a validator sets a more specific one.
pub const DEFAULT_CODE: &str = "validation-failed";

/// One rule violation.
///
/// Unlike [`Context`](super::Context), the fluent setters here modify the
/// error in place and hand back the same instance, so metadata can be
/// accumulated on a single error:
///
/// ```
/// use kv_validator::validator::ValidationError;
///
/// let mut err = ValidationError::new("key", "", "must not be empty");
/// err.with_code("not-empty").with_metadata("rule", "non-empty-key");
/// assert_eq!(err.code(), "not-empty");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    code: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    target: String,
    /// Rejected value, echoed back. Byte payloads are echoed as their length.
    #[serde(default)]
    value: Value,
}

impl ValidationError {
    /// Create an error with the default code and an empty metadata bag.
    pub fn new(
        target: impl Into<String>,
        value: impl Into<Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::unlabelled(target, value)
        }
    }

    /// Create an error without a human message; [`Display`](fmt::Display)
    /// then falls back to describing the rejected value.
    pub fn unlabelled(target: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind: ERROR_TYPE.to_string(),
            code: DEFAULT_CODE.to_string(),
            metadata: BTreeMap::new(),
            message: None,
            target: target.into(),
            value: value.into(),
        }
    }

    /// Set the machine-readable code.
    pub fn with_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.code = code.into();
        self
    }

    /// Add a metadata entry, replacing any previous value under `key`.
    pub fn with_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Broad category, always `"validation"` for errors built by this crate.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Serialize as `{type, code, metadata, message, target, value}`.
    ///
    /// Empty `code`, empty `metadata` and a missing `message` are omitted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) if !message.is_empty() => write!(f, "{}: {}", self.target, message),
            _ => match &self.value {
                Value::String(s) => write!(f, "{}: validation failed for \"{}\"", self.target, s),
                other => write!(f, "{}: validation failed for \"{}\"", self.target, other),
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Zero or more validation errors, in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error, keeping call order.
    pub fn add(&mut self, err: ValidationError) {
        self.errors.push(err);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Earliest reported error.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was reported, the whole result otherwise.
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }

    /// Serialize as `{"errors": [...]}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "validation failed");
        }
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}

impl From<ValidationError> for ValidationResult {
    fn from(err: ValidationError) -> Self {
        Self { errors: vec![err] }
    }
}

impl Extend<ValidationError> for ValidationResult {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_displays_value() {
        let err = ValidationError::new("key", "k1", "");
        assert_eq!(err.to_string(), "key: validation failed for \"k1\"");
    }

    #[test]
    fn test_new_error_defaults() {
        let err = ValidationError::new("username", "test", "username is required");
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.code(), "validation-failed");
        assert!(err.metadata().is_empty());
        assert_eq!(err.message(), Some("username is required"));
    }

    #[test]
    fn test_setters_mutate_in_place() {
        let mut err = ValidationError::new("email", "invalid@", "bad email");
        err.with_metadata("rule", "old-value");
        let same: *const ValidationError = err.with_metadata("rule", "email-format");

        assert!(std::ptr::eq(same, &err));
        assert_eq!(err.metadata().len(), 1);
        assert_eq!(err.metadata()["rule"], Value::from("email-format"));
    }

    #[test]
    fn test_display_with_and_without_message() {
        let err = ValidationError::new("username", "test", "invalid username");
        assert_eq!(err.to_string(), "username: invalid username");

        let err = ValidationError::unlabelled("age", -5);
        assert_eq!(err.to_string(), "age: validation failed for \"-5\"");

        let err = ValidationError::unlabelled("name", "bob");
        assert_eq!(err.to_string(), "name: validation failed for \"bob\"");
    }

    #[test]
    fn test_result_display() {
        let empty = ValidationResult::new();
        assert!(!empty.has_errors());
        assert_eq!(empty.to_string(), "validation failed");

        let result: ValidationResult = vec![
            ValidationError::new("key", "", "first"),
            ValidationError::new("key", "", "second"),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.to_string(), "key: first; key: second");
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let mut err = ValidationError::unlabelled("key", "x");
        err.with_code("");
        let json: Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj["type"], "validation");
        assert!(!obj.contains_key("code"));
        assert!(!obj.contains_key("metadata"));
        assert!(!obj.contains_key("message"));
        assert_eq!(obj["target"], "key");
        assert_eq!(obj["value"], "x");
    }
}
