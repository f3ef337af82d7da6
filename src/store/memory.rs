use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{Result, StoreError};

use super::Store;

/// In-memory backend over a map guarded by a read-write lock.
///
/// Values are copied in and out, so callers never alias stored bytes.
/// After [`close`](Store::close) every operation fails with
/// [`StoreError::Closed`].
#[derive(Debug)]
pub struct MemoryStore {
    /// `None` once closed
    data: RwLock<Option<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore {
            data: RwLock::new(Some(HashMap::new())),
        }
    }

    /// Number of stored keys (0 once closed).
    pub fn len(&self) -> usize {
        self.data.read().as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let guard = self.data.read();
        let data = guard.as_ref().ok_or(StoreError::Closed)?;
        let value = data.get(key).cloned();
        trace!(key, found = value.is_some(), "get");
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut guard = self.data.write();
        let data = guard.as_mut().ok_or(StoreError::Closed)?;
        data.insert(key.to_string(), value.to_vec());
        trace!(key, size = value.len(), "put");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut guard = self.data.write();
        let data = guard.as_mut().ok_or(StoreError::Closed)?;
        let existed = data.remove(key).is_some();
        trace!(key, existed, "delete");
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<BTreeMap<String, Vec<u8>>> {
        let guard = self.data.read();
        let data = guard.as_ref().ok_or(StoreError::Closed)?;
        let matches: BTreeMap<String, Vec<u8>> = data
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        trace!(prefix, matches = matches.len(), "scan");
        Ok(matches)
    }

    fn close(&self) -> Result<()> {
        let released = self.data.write().take();
        debug!(
            keys = released.as_ref().map_or(0, HashMap::len),
            "memory store closed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let store = MemoryStore::new();
        store.put("a", b"1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get("b").unwrap(), None);

        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_scan_by_prefix() {
        let store = MemoryStore::new();
        store.put("user:1", b"a").unwrap();
        store.put("user:2", b"b").unwrap();
        store.put("order:1", b"c").unwrap();

        let users = store.scan("user:").unwrap();
        assert_eq!(users.keys().collect::<Vec<_>>(), vec!["user:1", "user:2"]);
        assert_eq!(store.scan("").unwrap().len(), 3);
    }

    #[test]
    fn test_closed_store_rejects_operations() {
        let store = MemoryStore::new();
        store.put("a", b"1").unwrap();
        store.close().unwrap();

        assert!(matches!(store.get("a"), Err(StoreError::Closed)));
        assert!(matches!(store.put("a", b"2"), Err(StoreError::Closed)));
        assert!(matches!(store.scan(""), Err(StoreError::Closed)));
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(store.put("", b"x"), Err(StoreError::EmptyKey)));
    }
}
