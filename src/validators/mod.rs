//! Library of ready-made validators.
//!
//! Every factory here returns a named [`Validator`](crate::validator::Validator)
//! whose failures carry a fixed error code and metadata describing the
//! configured bound and the observed value.
//!
//! # Adding a new validator
//!
//! 1. Add a factory function to `string.rs` or `numeric.rs` (or a new module)
//! 2. Build the error with [`ValidationError::new`](crate::validator::ValidationError::new)
//!    using `ctx.target()` as the target
//! 3. Give it a stable code with `with_code` and attach the relevant bounds
//!    with `with_metadata`
//! 4. Name it with `with_name`
//!
//! # Example
//!
//! ```
//! use kv_validator::validator::{Context, ValidatorChain};
//! use kv_validator::validators::string;
//!
//! let mut chain = ValidatorChain::new();
//! chain.add(string::not_empty()).add(string::max_length(8));
//!
//! let result = chain.validate("far too long", &Context::new("key"));
//! assert_eq!(result.errors()[0].code(), "max-length");
//! ```

pub mod numeric;
pub mod string;

pub use numeric::Number;
