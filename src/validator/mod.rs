pub mod chain;
pub mod context;
pub mod error;
pub mod rule;

pub use chain::{ConditionalValidator, ValidatorChain};
pub use context::Context;
pub use error::{DEFAULT_CODE, ERROR_TYPE, ValidationError, ValidationResult};
pub use rule::{StringValidator, UNNAMED_VALIDATOR, Validator};
