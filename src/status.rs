//! Mapping from store errors to a transport-level status vocabulary.
//!
//! A network front end reports these instead of raw validation codes.

use std::fmt;

use crate::error::StoreError;
use crate::store::adapters::VALUE_TOO_LARGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    /// Malformed input: the request can never succeed as sent
    InvalidArgument,
    NotFound,
    /// Input exceeds a configured size limit
    ResourceExhausted,
    /// Backend closed or otherwise not serving
    Unavailable,
    Internal,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "ok",
            StatusCode::InvalidArgument => "invalid-argument",
            StatusCode::NotFound => "not-found",
            StatusCode::ResourceExhausted => "resource-exhausted",
            StatusCode::Unavailable => "unavailable",
            StatusCode::Internal => "internal",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status a front end should report for `err`.
pub fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation(v) if v.code() == VALUE_TOO_LARGE => StatusCode::ResourceExhausted,
        StoreError::Validation(_) | StoreError::EmptyKey => StatusCode::InvalidArgument,
        StoreError::Closed => StatusCode::Unavailable,
        StoreError::Io(_)
        | StoreError::ConfigRead { .. }
        | StoreError::Config(_)
        | StoreError::InvalidPattern { .. } => StatusCode::Internal,
    }
}

/// Status for the outcome of a `get`: a miss maps to `NotFound`.
pub fn status_for_lookup(result: &crate::error::Result<Option<Vec<u8>>>) -> StatusCode {
    match result {
        Ok(Some(_)) => StatusCode::Ok,
        Ok(None) => StatusCode::NotFound,
        Err(err) => status_for(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ValidationError;

    #[test]
    fn test_validation_codes() {
        let mut err = ValidationError::new("value", 10, "too large");
        err.with_code(VALUE_TOO_LARGE);
        assert_eq!(status_for(&err.into()), StatusCode::ResourceExhausted);

        let mut err = ValidationError::new("key", "", "must not be empty");
        err.with_code("not-empty");
        assert_eq!(status_for(&err.into()), StatusCode::InvalidArgument);
    }

    #[test]
    fn test_value_size_rule_maps_to_resource_exhausted() {
        let rule = crate::store::adapters::value_size(2);
        let err = rule("k", b"abc", &crate::validator::Context::new("value")).unwrap_err();
        assert_eq!(status_for(&err.into()), StatusCode::ResourceExhausted);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(status_for_lookup(&Ok(None)), StatusCode::NotFound);
        assert_eq!(status_for_lookup(&Err(StoreError::Closed)), StatusCode::Unavailable);
    }
}
