use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use tempfile::{NamedTempFile, TempDir};

use kv_validator::config::ValidationConfig;
use kv_validator::validator::{UNNAMED_VALIDATOR, ValidationResult};
use kv_validator::validators::{numeric, string};
use kv_validator::{
    ConditionalValidator, Context, MemoryStore, Store, StoreError, ValidatedStore,
    ValidationError, Validator, ValidatorChain,
};

/// A validator that fails with `code` when `fails` is set, counting calls.
fn probe(code: &'static str, fails: bool, calls: &Arc<AtomicUsize>) -> Validator<str> {
    let calls = Arc::clone(calls);
    Validator::new(move |value: &str, ctx: &Context| {
        calls.fetch_add(1, Ordering::SeqCst);
        if fails {
            let mut err = ValidationError::new(ctx.target(), value, code);
            err.with_code(code);
            return Err(err);
        }
        Ok(())
    })
    .with_name(code)
}

#[test]
fn test_chain_reports_all_failures_in_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chain = ValidatorChain::new();
    chain
        .add(probe("v1", true, &calls))
        .add(probe("v2", false, &calls))
        .add(probe("v3", true, &calls));

    let result = chain.validate("input", &Context::new("field"));
    let codes: Vec<&str> = result.errors().iter().map(ValidationError::code).collect();
    assert_eq!(codes, vec!["v1", "v3"]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(result.to_string(), "field: v1; field: v3");
}

#[test]
fn test_validate_first_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain: ValidatorChain<str> = [
        probe("v1", true, &calls),
        probe("v2", false, &calls),
        probe("v3", true, &calls),
    ]
    .into_iter()
    .collect();

    let err = chain.validate_first("input", &Context::new("field")).unwrap_err();
    assert_eq!(err.code(), "v1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_chain_passes() {
    let chain: ValidatorChain<str> = ValidatorChain::new();
    let ctx = Context::new("field");
    assert!(!chain.validate("x", &ctx).has_errors());
    assert!(chain.validate_first("x", &ctx).is_ok());
}

#[test]
fn test_validators_are_pure() {
    let ctx = Context::new("age").with_metadata("source", "form");
    let v = numeric::range(0, 120);

    assert_eq!(v.validate(&150, &ctx), v.validate(&150, &ctx));
    assert_eq!(v.validate(&30, &ctx), v.validate(&30, &ctx));

    let chain: ValidatorChain<str> = [string::min_length(3), string::alpha()].into_iter().collect();
    assert_eq!(chain.validate("a1", &ctx), chain.validate("a1", &ctx));
}

#[test]
fn test_with_name_leaves_original() {
    let original = string::not_empty();
    let renamed = original.with_name("username-required");

    assert_eq!(original.name(), "not-empty");
    assert_eq!(renamed.name(), "username-required");
    assert_eq!(
        Validator::<str>::new(|_: &str, _: &Context| Ok(())).name(),
        UNNAMED_VALIDATOR
    );

    let ctx = Context::new("username");
    assert_eq!(original.validate("", &ctx), renamed.validate("", &ctx));
}

#[test]
fn test_context_is_copy_on_write() {
    let c1 = Context::new("key").with_metadata("a", 1);
    let c2 = c1.with_metadata("k", "v");

    assert_eq!(c1.metadata().len(), 1);
    assert_eq!(c1.get("k"), None);
    assert_eq!(c2.metadata().len(), 2);
    assert_eq!(c2.get("k"), Some(&Value::from("v")));
}

#[test]
fn test_conditional_gate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let required = ConditionalValidator::new(
        |_: &str, ctx: &Context| ctx.get("required") == Some(&Value::Bool(true)),
        probe("required", true, &calls),
    );

    let optional_ctx = Context::new("nickname");
    assert!(required.validate("", &optional_ctx).is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let required_ctx = optional_ctx.with_metadata("required", true);
    assert_eq!(required.validate("", &required_ctx).unwrap_err().code(), "required");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_conditional_rename_and_chain() {
    let only_admins = ConditionalValidator::new(
        |key: &str, _: &Context| key.starts_with("admin:"),
        string::max_length(10),
    );
    let renamed = only_admins.with_name("admin-key-length");
    assert_eq!(only_admins.name(), "max-length");
    assert_eq!(renamed.name(), "admin-key-length");

    let mut chain = ValidatorChain::new();
    chain.add(string::not_empty()).add(renamed.into_validator());
    assert_eq!(chain.names().collect::<Vec<_>>(), vec!["not-empty", "admin-key-length"]);

    let ctx = Context::new("key");
    assert!(chain.validate_first("user:a-very-long-name", &ctx).is_ok());
    assert_eq!(
        chain.validate_first("admin:a-very-long-name", &ctx).unwrap_err().code(),
        "max-length"
    );
}

#[test]
fn test_error_json_round_trip() {
    let mut err = ValidationError::new("key", "bad key", "does not match required pattern");
    err.with_code("pattern-mismatch")
        .with_metadata("pattern", "^[a-z]+$")
        .with_metadata("attempt", 3)
        .with_metadata("tags", vec!["a", "b"]);

    let json = err.to_json().unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        parsed,
        json!({
            "type": "validation",
            "code": "pattern-mismatch",
            "metadata": {"attempt": 3, "pattern": "^[a-z]+$", "tags": ["a", "b"]},
            "message": "does not match required pattern",
            "target": "key",
            "value": "bad key",
        })
    );

    let back = ValidationError::from_json(&json).unwrap();
    assert_eq!(back, err);
    assert_eq!(back.kind(), "validation");
}

#[test]
fn test_result_json_shape() {
    let mut result = ValidationResult::new();
    result.add(ValidationError::unlabelled("key", ""));
    result.add(ValidationError::new("value", 10, "too large"));

    let parsed: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    let errors = parsed["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["code"], "validation-failed");
    assert!(errors[0].get("message").is_none());
    assert_eq!(errors[1]["value"], 10);

    assert_eq!(ValidationResult::from_json(&result.to_json().unwrap()).unwrap(), result);
    assert_eq!(result.to_string(), "key: validation failed for \"\"; value: too large");
}

#[test]
fn test_check_entry_collects_everything() {
    let config = ValidationConfig {
        max_key_length: 4,
        max_value_size: 2,
        key_pattern: Some("^[a-z]+$".to_string()),
        ..ValidationConfig::default()
    };

    let result = kv_validator::check_entry(&config, "Key 1", b"abc").unwrap();
    let codes: Vec<&str> = result.errors().iter().map(ValidationError::code).collect();
    assert_eq!(codes, vec!["max-length", "pattern-mismatch", "value-too-large"]);

    assert!(!kv_validator::check_entry(&config, "abc", b"ab").unwrap().has_errors());
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_key_length = 5").unwrap();
    writeln!(file, "max_value_size = 3").unwrap();

    let config = ValidationConfig::from_file(file.path()).unwrap();
    let store = ValidatedStore::from_config(MemoryStore::new(), &config).unwrap();

    store.put("abcde", b"xyz").unwrap();
    assert!(store.put("abcdef", b"x").is_err());
    assert!(store.put("abc", b"wxyz").is_err());
    assert_eq!(store.scan("").unwrap().len(), 1);
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let err = ValidationConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, StoreError::ConfigRead { .. }));
}
