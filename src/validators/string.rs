//! String validators.
//!
//! Lengths are counted in characters, not bytes.

use std::collections::HashSet;

use regex::Regex;

use crate::validator::{Context, StringValidator, ValidationError, Validator};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#].[^\s]*$";

/// Fails when the value is empty after trimming whitespace.
pub fn not_empty() -> StringValidator {
    Validator::new(|value: &str, ctx: &Context| {
        if value.trim().is_empty() {
            let mut err = ValidationError::new(ctx.target(), value, "must not be empty");
            err.with_code("not-empty");
            return Err(err);
        }
        Ok(())
    })
    .with_name("not-empty")
}

/// Fails unless `min <= length <= max`.
pub fn length(min: usize, max: usize) -> StringValidator {
    Validator::new(move |value: &str, ctx: &Context| {
        let length = value.chars().count();
        if length < min || length > max {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be between {} and {} characters, got {}", min, max, length),
            );
            err.with_code("length-range")
                .with_metadata("min-length", min)
                .with_metadata("max-length", max)
                .with_metadata("actual-length", length);
            return Err(err);
        }
        Ok(())
    })
    .with_name("length")
}

pub fn min_length(min: usize) -> StringValidator {
    Validator::new(move |value: &str, ctx: &Context| {
        let length = value.chars().count();
        if length < min {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be at least {} characters, got {}", min, length),
            );
            err.with_code("min-length")
                .with_metadata("min", min)
                .with_metadata("actual", length);
            return Err(err);
        }
        Ok(())
    })
    .with_name("min-length")
}

pub fn max_length(max: usize) -> StringValidator {
    Validator::new(move |value: &str, ctx: &Context| {
        let length = value.chars().count();
        if length > max {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be at most {} characters, got {}", max, length),
            );
            err.with_code("max-length")
                .with_metadata("max", max)
                .with_metadata("actual", length);
            return Err(err);
        }
        Ok(())
    })
    .with_name("max-length")
}

/// Fails when the value does not match `pattern`.
///
/// The pattern is compiled once, here.
pub fn pattern(pattern: &str) -> Result<StringValidator, regex::Error> {
    let regex = Regex::new(pattern)?;
    let pattern = pattern.to_string();
    Ok(Validator::new(move |value: &str, ctx: &Context| {
        if !regex.is_match(value) {
            let mut err =
                ValidationError::new(ctx.target(), value, "does not match required pattern");
            err.with_code("pattern-mismatch")
                .with_metadata("pattern", pattern.as_str());
            return Err(err);
        }
        Ok(())
    })
    .with_name("pattern"))
}

pub fn email() -> Result<StringValidator, regex::Error> {
    Ok(pattern(EMAIL_PATTERN)?.with_name("email"))
}

pub fn url() -> Result<StringValidator, regex::Error> {
    Ok(pattern(URL_PATTERN)?.with_name("url"))
}

/// Fails unless the value is exactly one of `allowed`.
pub fn one_of<I, S>(allowed: I) -> StringValidator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    let lookup: HashSet<String> = allowed.iter().cloned().collect();
    Validator::new(move |value: &str, ctx: &Context| {
        if !lookup.contains(value) {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be one of {}", allowed.join(", ")),
            );
            err.with_code("not-one-of")
                .with_metadata("allowed-values", allowed.clone());
            return Err(err);
        }
        Ok(())
    })
    .with_name("one-of")
}

pub fn no_whitespace() -> StringValidator {
    Validator::new(|value: &str, ctx: &Context| {
        if value.chars().any(char::is_whitespace) {
            let mut err = ValidationError::new(ctx.target(), value, "cannot contain whitespace");
            err.with_code("contains-whitespace");
            return Err(err);
        }
        Ok(())
    })
    .with_name("no-whitespace")
}

pub fn alpha() -> StringValidator {
    Validator::new(|value: &str, ctx: &Context| {
        if !value.chars().all(char::is_alphabetic) {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                "must contain only alphabetic characters",
            );
            err.with_code("not-alpha");
            return Err(err);
        }
        Ok(())
    })
    .with_name("alpha")
}

pub fn alphanumeric() -> StringValidator {
    Validator::new(|value: &str, ctx: &Context| {
        if !value.chars().all(char::is_alphanumeric) {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                "must contain only alphanumeric characters",
            );
            err.with_code("not-alphanumeric");
            return Err(err);
        }
        Ok(())
    })
    .with_name("alphanumeric")
}

/// Wrap an arbitrary predicate; `message` is reported when it returns false.
pub fn custom<F>(predicate: F, message: impl Into<String>) -> StringValidator
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Validator::new(move |value: &str, ctx: &Context| {
        if !predicate(value) {
            let mut err = ValidationError::new(ctx.target(), value, message.as_str());
            err.with_code("custom-validation-failed");
            return Err(err);
        }
        Ok(())
    })
    .with_name("custom")
}
