use std::fmt;
use std::sync::Arc;

use super::{Context, ValidationError};

/// Name reported by validators that were never given one.
pub const UNNAMED_VALIDATOR: &str = "unnamed-validator";

/// A named, reusable rule over values of type `T`.
///
/// The check itself is shared behind an `Arc`, so cloning or renaming a
/// validator never copies the rule and a validator can be used from many
/// threads at once.
pub struct Validator<T: ?Sized> {
    name: Option<String>,
    check: Arc<dyn Fn(&T, &Context) -> Result<(), ValidationError> + Send + Sync>,
}

/// Validator over string slices.
pub type StringValidator = Validator<str>;

impl<T: ?Sized> Validator<T> {
    /// Create an unnamed validator from a check function.
    ///
    /// The check returns `Ok(())` when the rule passes.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T, &Context) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    /// Run the rule against `value`.
    pub fn validate(&self, value: &T, ctx: &Context) -> Result<(), ValidationError> {
        (self.check)(value, ctx)
    }

    /// Returns a copy of this validator under a different name.
    ///
    /// The original keeps its own name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            check: Arc::clone(&self.check),
        }
    }

    /// Diagnostic name, or [`UNNAMED_VALIDATOR`] when none was set.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_VALIDATOR)
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
