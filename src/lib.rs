pub mod config;
pub mod error;
pub mod report;
pub mod status;
pub mod store;
pub mod validator;
pub mod validators;

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::validator::ValidationResult;

pub use crate::error::StoreError;
pub use crate::store::{KeyValidator, MemoryStore, Store, ValidatedStore, ValueValidator};
pub use crate::validator::{
    ConditionalValidator, Context, StringValidator, ValidationError, Validator, ValidatorChain,
};

/// Check a key against every rule in `config` and report all violations.
pub fn check_key(config: &ValidationConfig, key: &str) -> Result<ValidationResult> {
    let keys = config.key_validator()?;
    Ok(keys.validate_all(key))
}

/// Check a key/value pair against every rule in `config`.
///
/// Key violations come first, followed by value violations.
pub fn check_entry(config: &ValidationConfig, key: &str, value: &[u8]) -> Result<ValidationResult> {
    let mut result = check_key(config, key)?;
    result.extend(config.value_validator().validate_all(key, value));
    Ok(result)
}
