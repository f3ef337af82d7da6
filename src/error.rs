use std::path::PathBuf;
use thiserror::Error;

use crate::validator::ValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    // Validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Backend Errors
    #[error("key cannot be empty")]
    EmptyKey,

    #[error("store is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration Errors
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl StoreError {
    /// Returns the structured validation error, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the operation was rejected before reaching the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
