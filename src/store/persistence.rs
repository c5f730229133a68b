use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::store::KeyValueStore;
use crate::store::schema::{PROGRESS_KEY, ProgressRecord, WRONG_NOTEBOOK_KEY, WrongNotebook};

/// Typed access to the two durable records.
///
/// Reads never fail: a missing or corrupt record comes back as its default.
/// Every write replaces the whole record.
pub struct Persistence {
    backend: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn read_progress(&self) -> ProgressRecord {
        self.read_or_default(PROGRESS_KEY)
    }

    pub fn write_progress(&self, record: &ProgressRecord) -> Result<(), StoreError> {
        self.write(PROGRESS_KEY, record)
    }

    pub fn read_wrong_notebook(&self) -> WrongNotebook {
        self.read_or_default(WRONG_NOTEBOOK_KEY)
    }

    pub fn write_wrong_notebook(&self, notebook: &WrongNotebook) -> Result<(), StoreError> {
        self.write(WRONG_NOTEBOOK_KEY, notebook)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|cause| StoreError::Parse {
                key: key.to_string(),
                cause,
            })
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.read(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable record");
                T::default()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|cause| StoreError::Encode {
            key: key.to_string(),
            cause,
        })?;
        self.backend.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::vocab::entry::{LevelId, VocabEntry};

    /// Lets a test keep a handle on the backend the adapter owns.
    struct Shared(Rc<MemoryStore>);

    impl KeyValueStore for Shared {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.set(key, value)
        }
    }

    fn make_persistence() -> (Rc<MemoryStore>, Persistence) {
        let backend = Rc::new(MemoryStore::new());
        let persistence = Persistence::new(Box::new(Shared(Rc::clone(&backend))));
        (backend, persistence)
    }

    #[test]
    fn empty_store_reads_defaults() {
        let (_backend, persistence) = make_persistence();
        assert!(persistence.read_progress().is_empty());
        assert!(persistence.read_wrong_notebook().is_empty());
    }

    #[test]
    fn corrupt_records_degrade_to_empty() {
        let (backend, persistence) = make_persistence();
        backend.insert_raw(PROGRESS_KEY, "{not json");
        backend.insert_raw(WRONG_NOTEBOOK_KEY, r#"{"term":"cat"}"#);
        assert!(persistence.read_progress().is_empty());
        assert!(persistence.read_wrong_notebook().is_empty());
    }

    #[test]
    fn null_record_reads_as_default() {
        let (backend, persistence) = make_persistence();
        backend.insert_raw(PROGRESS_KEY, "null");
        assert!(persistence.read_progress().is_empty());
    }

    #[test]
    fn progress_round_trip() {
        let (_backend, persistence) = make_persistence();
        let level = LevelId::new("level1");
        let mut record = ProgressRecord::default();
        record.set_cursor(&level, 4);
        persistence.write_progress(&record).unwrap();
        assert_eq!(persistence.read_progress(), record);
    }

    #[test]
    fn notebook_round_trip() {
        let (backend, persistence) = make_persistence();
        let mut notebook = WrongNotebook::default();
        notebook.add(&VocabEntry::new("cat", "貓"), Some(LevelId::new("level1")));
        persistence.write_wrong_notebook(&notebook).unwrap();

        let raw = backend.get(WRONG_NOTEBOOK_KEY).unwrap().unwrap();
        assert!(raw.contains(r#""level":"level1""#));

        let restored = persistence.read_wrong_notebook();
        assert_eq!(restored.len(), 1);
        assert!(restored.contains(&VocabEntry::new("cat", "貓")));
    }
}
