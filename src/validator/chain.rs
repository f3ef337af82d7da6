use std::fmt;
use std::sync::Arc;

use super::{Context, ValidationError, ValidationResult, Validator};

/// Ordered list of validators over the same type.
///
/// A chain can report every violation ([`validate`](Self::validate)) or stop
/// at the first one ([`validate_first`](Self::validate_first)).
pub struct ValidatorChain<T: ?Sized> {
    validators: Vec<Validator<T>>,
}

impl<T: ?Sized> ValidatorChain<T> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a validator. Members run in the order they were added.
    pub fn add(&mut self, validator: Validator<T>) -> &mut Self {
        self.validators.push(validator);
        self
    }

    /// Run every member and collect all failures in add order.
    pub fn validate(&self, value: &T, ctx: &Context) -> ValidationResult {
        self.validators
            .iter()
            .filter_map(|validator| validator.validate(value, ctx).err())
            .collect()
    }

    /// Run members until one fails and return that failure.
    ///
    /// Members after the failing one are not invoked.
    pub fn validate_first(&self, value: &T, ctx: &Context) -> Result<(), ValidationError> {
        for validator in &self.validators {
            validator.validate(value, ctx)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of the members, in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(Validator::name)
    }
}

impl<T: ?Sized> Default for ValidatorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ValidatorChain<T> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ValidatorChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<T: ?Sized> FromIterator<Validator<T>> for ValidatorChain<T> {
    fn from_iter<I: IntoIterator<Item = Validator<T>>>(iter: I) -> Self {
        Self {
            validators: iter.into_iter().collect(),
        }
    }
}

impl<T: ?Sized> Extend<Validator<T>> for ValidatorChain<T> {
    fn extend<I: IntoIterator<Item = Validator<T>>>(&mut self, iter: I) {
        self.validators.extend(iter);
    }
}

/// A validator that only runs when its predicate holds.
///
/// When the predicate returns false the value passes without the inner
/// validator ever being invoked.
pub struct ConditionalValidator<T: ?Sized> {
    condition: Arc<dyn Fn(&T, &Context) -> bool + Send + Sync>,
    validator: Validator<T>,
}

impl<T: ?Sized> ConditionalValidator<T> {
    pub fn new<F>(condition: F, validator: Validator<T>) -> Self
    where
        F: Fn(&T, &Context) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Arc::new(condition),
            validator,
        }
    }

    pub fn validate(&self, value: &T, ctx: &Context) -> Result<(), ValidationError> {
        if (self.condition)(value, ctx) {
            self.validator.validate(value, ctx)
        } else {
            Ok(())
        }
    }

    /// Returns a copy whose inner validator carries `name`.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            condition: Arc::clone(&self.condition),
            validator: self.validator.with_name(name),
        }
    }

    pub fn name(&self) -> &str {
        self.validator.name()
    }

    /// Flatten into a plain validator so it can join a chain.
    pub fn into_validator(self) -> Validator<T>
    where
        T: 'static,
    {
        let name = self.name().to_string();
        Validator::new(move |value: &T, ctx: &Context| self.validate(value, ctx)).with_name(name)
    }
}

impl<T: ?Sized> Clone for ConditionalValidator<T> {
    fn clone(&self) -> Self {
        Self {
            condition: Arc::clone(&self.condition),
            validator: self.validator.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ConditionalValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalValidator")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + 'static> From<ConditionalValidator<T>> for Validator<T> {
    fn from(conditional: ConditionalValidator<T>) -> Self {
        conditional.into_validator()
    }
}
