//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StorageError, StorageResult};

/// A call made against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// `get(key)`
    Get(String),
    /// `set(key, value)`
    Set(String, String),
    /// `remove(key)`
    Remove(String),
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    operations: Vec<StoreOperation>,
}

/// Key-value store held in process memory.
///
/// Every call is appended to an operation log so callers can assert exactly
/// which reads and writes happened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    ///
    /// Seeding is not recorded in the operation log.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { inner: Mutex::new(Inner { values, operations: Vec::new() }) }
    }

    /// Returns a copy of the operation log.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.inner.lock().map(|inner| inner.operations.clone()).unwrap_or_default()
    }

    /// Returns the number of `remove` calls made so far.
    pub fn remove_count(&self) -> usize {
        self.operations().iter().filter(|op| matches!(op, StoreOperation::Remove(_))).count()
    }

    /// Returns the current value under `key` without logging the read.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().ok().and_then(|inner| inner.values.get(key).cloned())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut inner = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        inner.operations.push(StoreOperation::Get(key.to_string()));
        Ok(inner.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut inner = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        inner.operations.push(StoreOperation::Set(key.to_string(), value.to_string()));
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut inner = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        inner.operations.push(StoreOperation::Remove(key.to_string()));
        inner.values.remove(key);
        Ok(())
    }
}
