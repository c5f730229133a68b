pub mod json_store;
pub mod memory;
pub mod persistence;
pub mod schema;

use crate::error::StoreError;

/// String key-value backend behind [`persistence::Persistence`].
///
/// Every `set` replaces the whole value under one key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
