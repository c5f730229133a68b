use std::collections::HashMap;
use std::path::Path;
use std::thread;

use crate::error::LoadError;
use crate::vocab::entry::{LevelDef, LevelId, VocabEntry};
use crate::vocab::source::LevelSource;

/// Parse level text: one `term,translation` per line.
///
/// A leading byte-order mark is dropped. Lines are trimmed and blank ones
/// skipped. Only the first two comma-separated fields are used; a line without
/// a comma keeps an empty translation.
pub fn parse_level(text: &str) -> Vec<VocabEntry> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut fields = line.split(',').map(str::trim);
            let term = fields.next().unwrap_or_default();
            let translation = fields.next().unwrap_or_default();
            VocabEntry::new(term, translation)
        })
        .collect()
}

/// All loaded vocabulary, grouped by level, plus the cross-level distractor pool.
pub struct WordStore {
    levels: Vec<LevelDef>,
    by_level: HashMap<LevelId, Vec<VocabEntry>>,
    combined: Vec<VocabEntry>,
}

impl WordStore {
    /// Load every level concurrently. Any single failure fails the whole load.
    pub fn load(levels: &[LevelDef], base_dir: &Path) -> Result<Self, LoadError> {
        let sources: Vec<LevelSource> = levels
            .iter()
            .map(|def| LevelSource::parse(&def.source, base_dir))
            .collect();

        let texts: Vec<Result<String, LoadError>> = thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .map(|source| {
                    scope.spawn(move || {
                        tracing::debug!(source = %source.describe(), "loading level source");
                        source.read_to_string()
                    })
                })
                .collect();

            handles
                .into_iter()
                .zip(&sources)
                .map(|(handle, source)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(LoadError::Panicked {
                            source_name: source.describe(),
                        })
                    })
                })
                .collect()
        });

        let mut parsed = Vec::with_capacity(levels.len());
        for (def, text) in levels.iter().zip(texts) {
            let entries = parse_level(&text?);
            tracing::debug!(level = %def.id, count = entries.len(), "parsed level");
            parsed.push((def.clone(), entries));
        }

        let store = Self::from_levels(parsed);
        tracing::info!(
            levels = store.levels.len(),
            words = store.combined.len(),
            "vocabulary loaded"
        );
        Ok(store)
    }

    /// Build a store from already parsed levels, keeping their order.
    pub fn from_levels(levels: Vec<(LevelDef, Vec<VocabEntry>)>) -> Self {
        let mut defs = Vec::with_capacity(levels.len());
        let mut by_level = HashMap::with_capacity(levels.len());
        let mut combined = Vec::new();

        for (def, entries) in levels {
            combined.extend(entries.iter().cloned());
            by_level.insert(def.id.clone(), entries);
            defs.push(def);
        }

        Self {
            levels: defs,
            by_level,
            combined,
        }
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    pub fn level(&self, id: &LevelId) -> Option<&LevelDef> {
        self.levels.iter().find(|def| &def.id == id)
    }

    pub fn level_name<'a>(&'a self, id: &'a LevelId) -> &'a str {
        self.level(id).map(|def| def.name.as_str()).unwrap_or(id.as_str())
    }

    /// Entries of one level; empty for an unknown id.
    pub fn entries(&self, id: &LevelId) -> &[VocabEntry] {
        self.by_level.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn combined_pool(&self) -> &[VocabEntry] {
        &self.combined
    }
}
