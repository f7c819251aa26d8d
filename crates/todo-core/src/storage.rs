//! Key-Value Storage Layer
//!
//! Abstract string slot storage. The browser implementation wraps
//! `window.localStorage`; `MemoryStore` backs tests and headless use.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{StorageError, StorageResult};

/// Durable string storage addressed by key
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when it was never written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite a slot
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.slots.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// Make subsequent writes fail as if the quota were exceeded
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("tasks").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("tasks", "[]").unwrap();
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_failing_writes_keep_old_value() {
        let store = MemoryStore::with_slot("tasks", "[1]");
        store.set_fail_writes(true);
        assert!(matches!(store.set("tasks", "[2]"), Err(StorageError::Write(_))));
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.write_count(), 0);
    }
}
