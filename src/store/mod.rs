//! The storage contract and its implementations.
//!
//! Any type implementing [`Store`] can sit behind a [`ValidatedStore`],
//! including another `ValidatedStore`.

pub mod adapters;
pub mod memory;
pub mod validated;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;

pub use adapters::{KeyValidator, ValueRule, ValueValidator};
pub use memory::MemoryStore;
pub use validated::ValidatedStore;

/// Operations every key-value backend provides.
pub trait Store: Send + Sync {
    /// Fetch the value stored under `key`, `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// All entries whose key starts with `prefix`.
    fn scan(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>>;

    /// Release the backend. Later operations may fail.
    fn close(&self) -> Result<()>;
}

macro_rules! forward_store {
    ($($ptr:ty),*) => {
        $(
            impl<S: Store + ?Sized> Store for $ptr {
                fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
                    (**self).get(key)
                }

                fn put(&self, key: &str, value: &[u8]) -> Result<()> {
                    (**self).put(key, value)
                }

                fn delete(&self, key: &str) -> Result<()> {
                    (**self).delete(key)
                }

                fn scan(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>> {
                    (**self).scan(prefix)
                }

                fn close(&self) -> Result<()> {
                    (**self).close()
                }
            }
        )*
    };
}

forward_store!(&S, Box<S>, Arc<S>);
