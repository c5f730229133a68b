use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::entry::{LevelId, VocabEntry};

pub const PROGRESS_KEY: &str = "progress";
pub const WRONG_NOTEBOOK_KEY: &str = "wrong_notebook";

/// Per-level resume cursor, stored as a flat `{ "level1": 3, ... }` object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    cursors: BTreeMap<LevelId, usize>,
}

impl ProgressRecord {
    /// Stored cursor for `level`, 0 when the level was never practiced.
    pub fn cursor(&self, level: &LevelId) -> usize {
        self.cursors.get(level).copied().unwrap_or(0)
    }

    pub fn set_cursor(&mut self, level: &LevelId, cursor: usize) {
        self.cursors.insert(level.clone(), cursor);
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WrongEntry {
    pub term: String,
    pub translation: String,
    /// Older records may predate level tagging.
    #[serde(default)]
    pub level: Option<LevelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WrongEntry {
    pub fn new(entry: &VocabEntry, level: Option<LevelId>) -> Self {
        Self {
            term: entry.term.clone(),
            translation: entry.translation.clone(),
            level,
            added_at: Some(Utc::now()),
        }
    }

    pub fn matches(&self, entry: &VocabEntry) -> bool {
        self.term == entry.term && self.translation == entry.translation
    }

    pub fn to_vocab(&self) -> VocabEntry {
        VocabEntry::new(self.term.as_str(), self.translation.as_str())
    }
}

/// Entries worth reviewing again, unique by `(term, translation)`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrongNotebook {
    entries: Vec<WrongEntry>,
}

impl WrongNotebook {
    pub fn entries(&self) -> &[WrongEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WrongEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, entry: &VocabEntry) -> bool {
        self.entries.iter().any(|e| e.matches(entry))
    }

    /// Append unless an entry with the same term and translation exists.
    /// Returns whether the notebook changed.
    pub fn add(&mut self, entry: &VocabEntry, level: Option<LevelId>) -> bool {
        if self.contains(entry) {
            return false;
        }
        self.entries.push(WrongEntry::new(entry, level));
        true
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, entry: &VocabEntry) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.matches(entry));
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Human summary line shown beside the notebook actions.
    pub fn summary(&self) -> String {
        match self.entries.len() {
            0 => "No wrong items recorded yet.".to_string(),
            1 => "1 item saved in your wrong notebook.".to_string(),
            n => format!("{n} items saved in your wrong notebook."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_serializes_flat() {
        let mut record = ProgressRecord::default();
        record.set_cursor(&LevelId::new("level1"), 3);
        record.set_cursor(&LevelId::new("level2"), 0);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"level1":3,"level2":0}"#);
    }

    #[test]
    fn progress_missing_level_defaults_to_zero() {
        let record: ProgressRecord = serde_json::from_str(r#"{"level1":7}"#).unwrap();
        assert_eq!(record.cursor(&LevelId::new("level1")), 7);
        assert_eq!(record.cursor(&LevelId::new("level9")), 0);
    }

    #[test]
    fn progress_rejects_negative_cursor() {
        assert!(serde_json::from_str::<ProgressRecord>(r#"{"level1":-1}"#).is_err());
    }

    #[test]
    fn notebook_add_is_idempotent() {
        let mut notebook = WrongNotebook::default();
        let cat = VocabEntry::new("cat", "貓");
        assert!(notebook.add(&cat, Some(LevelId::new("level1"))));
        assert!(!notebook.add(&cat, Some(LevelId::new("level2"))));
        assert_eq!(notebook.len(), 1);
        assert_eq!(notebook.entries()[0].level, Some(LevelId::new("level1")));
    }

    #[test]
    fn notebook_dedup_uses_both_fields() {
        let mut notebook = WrongNotebook::default();
        notebook.add(&VocabEntry::new("cat", "貓"), None);
        notebook.add(&VocabEntry::new("cat", "貓咪"), None);
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn notebook_remove_and_clear() {
        let mut notebook = WrongNotebook::default();
        let cat = VocabEntry::new("cat", "貓");
        let dog = VocabEntry::new("dog", "狗");
        notebook.add(&cat, None);
        notebook.add(&dog, None);
        assert!(notebook.remove(&cat));
        assert!(!notebook.remove(&cat));
        assert_eq!(notebook.len(), 1);
        notebook.clear();
        assert!(notebook.is_empty());
    }

    #[test]
    fn notebook_reads_entries_without_level_or_timestamp() {
        let json = r#"[{"term":"cat","translation":"貓"},{"term":"dog","translation":"狗","level":"level2"}]"#;
        let notebook: WrongNotebook = serde_json::from_str(json).unwrap();
        assert_eq!(notebook.len(), 2);
        assert_eq!(notebook.entries()[0].level, None);
        assert_eq!(notebook.entries()[1].level, Some(LevelId::new("level2")));
        assert!(notebook.entries()[0].added_at.is_none());
    }

    #[test]
    fn summary_pluralizes() {
        let mut notebook = WrongNotebook::default();
        assert_eq!(notebook.summary(), "No wrong items recorded yet.");
        notebook.add(&VocabEntry::new("cat", "貓"), None);
        assert_eq!(notebook.summary(), "1 item saved in your wrong notebook.");
        notebook.add(&VocabEntry::new("dog", "狗"), None);
        assert_eq!(notebook.summary(), "2 items saved in your wrong notebook.");
    }
}
