//! Numeric validators, generic over every primitive integer and float.

use std::fmt::Display;

use serde_json::Value;

use crate::validator::{Context, ValidationError, Validator};

/// Ordered primitive number usable with the numeric validators.
pub trait Number: Copy + PartialOrd + Display + Into<Value> + Send + Sync + 'static {
    const ZERO: Self;
}

macro_rules! impl_number {
    ($zero:expr => $($t:ty),*) => {
        $(
            impl Number for $t {
                const ZERO: Self = $zero;
            }
        )*
    };
}

impl_number!(0 => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_number!(0.0 => f32, f64);

/// Fails unless `min <= value <= max`.
pub fn range<T: Number>(min: T, max: T) -> Validator<T> {
    Validator::new(move |value: &T, ctx: &Context| {
        let value = *value;
        if value < min || value > max {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be between {} and {}, got {}", min, max, value),
            );
            err.with_code("numeric-range")
                .with_metadata("min", min)
                .with_metadata("max", max)
                .with_metadata("actual", value);
            return Err(err);
        }
        Ok(())
    })
    .with_name("numeric-range")
}

pub fn min<T: Number>(min: T) -> Validator<T> {
    Validator::new(move |value: &T, ctx: &Context| {
        let value = *value;
        if value < min {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be at least {}, got {}", min, value),
            );
            err.with_code("min-value")
                .with_metadata("min", min)
                .with_metadata("actual", value);
            return Err(err);
        }
        Ok(())
    })
    .with_name("min-value")
}

pub fn max<T: Number>(max: T) -> Validator<T> {
    Validator::new(move |value: &T, ctx: &Context| {
        let value = *value;
        if value > max {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be at most {}, got {}", max, value),
            );
            err.with_code("max-value")
                .with_metadata("max", max)
                .with_metadata("actual", value);
            return Err(err);
        }
        Ok(())
    })
    .with_name("max-value")
}

/// Fails on zero and negative values.
pub fn positive<T: Number>() -> Validator<T> {
    Validator::new(|value: &T, ctx: &Context| {
        let value = *value;
        if value <= T::ZERO {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be positive, got {}", value),
            );
            err.with_code("non-positive")
                .with_metadata("actual", value);
            return Err(err);
        }
        Ok(())
    })
    .with_name("positive")
}

pub fn non_negative<T: Number>() -> Validator<T> {
    Validator::new(|value: &T, ctx: &Context| {
        let value = *value;
        if value < T::ZERO {
            let mut err = ValidationError::new(
                ctx.target(),
                value,
                format!("must be non-negative, got {}", value),
            );
            err.with_code("non-negative")
                .with_metadata("actual", value);
            return Err(err);
        }
        Ok(())
    })
    .with_name("non-negative")
}
