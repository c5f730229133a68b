use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access for tests that plant corrupt records.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert_raw(key, value);
        Ok(())
    }
}
