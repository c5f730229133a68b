use crate::store::persistence::Persistence;
use crate::vocab::entry::{LevelId, VocabEntry};

/// Read-modify-write add. Returns whether the entry was new.
pub fn add_to_notebook(storage: &Persistence, entry: &VocabEntry, level: Option<&LevelId>) -> bool {
    let mut notebook = storage.read_wrong_notebook();
    if !notebook.add(entry, level.cloned()) {
        return false;
    }
    if let Err(err) = storage.write_wrong_notebook(&notebook) {
        tracing::warn!(%err, term = %entry.term, "failed to save wrong notebook");
    }
    tracing::debug!(term = %entry.term, size = notebook.len(), "added to wrong notebook");
    true
}

pub fn remove_from_notebook(storage: &Persistence, entry: &VocabEntry) -> bool {
    let mut notebook = storage.read_wrong_notebook();
    if !notebook.remove(entry) {
        return false;
    }
    if let Err(err) = storage.write_wrong_notebook(&notebook) {
        tracing::warn!(%err, term = %entry.term, "failed to save wrong notebook");
    }
    true
}

pub fn clear_notebook(storage: &Persistence) {
    let mut notebook = storage.read_wrong_notebook();
    notebook.clear();
    if let Err(err) = storage.write_wrong_notebook(&notebook) {
        tracing::warn!(%err, "failed to clear wrong notebook");
    }
    tracing::info!("wrong notebook cleared");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn storage() -> Persistence {
        Persistence::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn add_twice_keeps_one_entry() {
        let storage = storage();
        let cat = VocabEntry::new("cat", "貓");
        let level = LevelId::new("level1");
        assert!(add_to_notebook(&storage, &cat, Some(&level)));
        assert!(!add_to_notebook(&storage, &cat, Some(&level)));
        assert_eq!(storage.read_wrong_notebook().len(), 1);
    }

    #[test]
    fn remove_only_touches_matching_entry() {
        let storage = storage();
        let cat = VocabEntry::new("cat", "貓");
        let dog = VocabEntry::new("dog", "狗");
        add_to_notebook(&storage, &cat, None);
        add_to_notebook(&storage, &dog, None);
        assert!(remove_from_notebook(&storage, &cat));
        assert!(!remove_from_notebook(&storage, &cat));
        let notebook = storage.read_wrong_notebook();
        assert_eq!(notebook.len(), 1);
        assert!(notebook.contains(&dog));
    }

    #[test]
    fn clear_empties_the_notebook() {
        let storage = storage();
        add_to_notebook(&storage, &VocabEntry::new("cat", "貓"), None);
        clear_notebook(&storage);
        assert!(storage.read_wrong_notebook().is_empty());
    }
}
