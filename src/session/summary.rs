use crate::store::persistence::Persistence;
use crate::vocab::entry::LevelId;
use crate::vocab::word_store::WordStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    pub id: LevelId,
    pub name: String,
    pub cursor: usize,
    pub total: usize,
}

impl LevelProgress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.cursor as f64 / self.total as f64
    }
}

/// Stored cursor against level size, for every level in declaration order.
pub fn progress_summary(words: &WordStore, storage: &Persistence) -> Vec<LevelProgress> {
    let progress = storage.read_progress();
    words
        .levels()
        .iter()
        .map(|def| LevelProgress {
            id: def.id.clone(),
            name: def.name.clone(),
            cursor: progress.cursor(&def.id),
            total: words.entries(&def.id).len(),
        })
        .collect()
}

/// `Level 1: 3/16 | Level 2: 0/16 | ...`
pub fn format_progress_line(summary: &[LevelProgress]) -> String {
    summary
        .iter()
        .map(|p| format!("{}: {}/{}", p.name, p.cursor, p.total))
        .collect::<Vec<_>>()
        .join(" | ")
}
