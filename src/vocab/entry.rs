use std::fmt;

use serde::{Deserialize, Serialize};

/// One term/translation pair from a level file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabEntry {
    pub term: String,
    pub translation: String,
}

impl VocabEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Declaration of one level: where its words come from and how it is labelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: LevelId,
    pub name: String,
    pub source: String,
}

impl LevelDef {
    pub fn new(id: &str, name: &str, source: &str) -> Self {
        Self {
            id: LevelId::new(id),
            name: name.to_string(),
            source: source.to_string(),
        }
    }
}

/// The six levels bundled with the binary.
pub fn default_levels() -> Vec<LevelDef> {
    (1..=6)
        .map(|n| {
            LevelDef::new(
                &format!("level{n}"),
                &format!("Level {n}"),
                &format!("builtin:level{n}.csv"),
            )
        })
        .collect()
}
