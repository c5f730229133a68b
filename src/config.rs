use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::shuffle::OrderMode;
use crate::store::json_store::default_data_dir;
use crate::vocab::entry::{LevelDef, default_levels};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_data_dir_string")]
    pub data_dir: String,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default = "default_levels")]
    pub levels: Vec<LevelDef>,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_data_dir_string() -> String {
    default_data_dir().to_string_lossy().to_string()
}
fn default_shuffle() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            data_dir: default_data_dir_string(),
            shuffle: default_shuffle(),
            levels: default_levels(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the config file and returns where it went.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexdr")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn order_mode(&self) -> OrderMode {
        if self.shuffle {
            OrderMode::Shuffled
        } else {
            OrderMode::Sequential
        }
    }

    /// Drop level definitions with empty or repeated ids, keeping the first
    /// occurrence. An empty table falls back to the bundled levels.
    pub fn validate(&mut self) {
        let mut seen = HashSet::new();
        self.levels.retain(|def| {
            let id = def.id.as_str().trim();
            !id.is_empty() && seen.insert(id.to_string())
        });
        for def in &mut self.levels {
            if def.name.trim().is_empty() {
                def.name = def.id.to_string();
            }
        }
        if self.levels.is_empty() {
            self.levels = default_levels();
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::entry::LevelId;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert!(config.shuffle);
        assert_eq!(config.levels.len(), 6);
        assert_eq!(config.levels[0].id, LevelId::new("level1"));
        assert_eq!(config.levels[5].source, "builtin:level6.csv");
        assert!(config.data_dir.contains("lexdr"));
    }

    #[test]
    fn test_config_custom_levels() {
        let toml_str = r#"
theme = "terminal-default"
shuffle = false

[[levels]]
id = "basics"
name = "Basics"
source = "basics.csv"

[[levels]]
id = "travel"
name = "Travel"
source = "https://example.com/travel.csv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.order_mode(), OrderMode::Sequential);
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.levels[1].name, "Travel");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.levels, deserialized.levels);
        assert_eq!(config.data_dir, deserialized.data_dir);
        assert_eq!(config.shuffle, deserialized.shuffle);
    }

    #[test]
    fn test_validate_drops_duplicate_and_empty_ids() {
        let mut config = Config::default();
        config.levels = vec![
            LevelDef::new("a", "A", "a.csv"),
            LevelDef::new("a", "Again", "a2.csv"),
            LevelDef::new("  ", "Blank", "b.csv"),
            LevelDef::new("c", "", "c.csv"),
        ];
        config.validate();
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.levels[0].name, "A");
        assert_eq!(config.levels[1].name, "c");
    }

    #[test]
    fn test_validate_restores_default_levels() {
        let mut config = Config::default();
        config.levels.clear();
        config.data_dir = String::new();
        config.validate();
        assert_eq!(config.levels, default_levels());
        assert!(!config.data_dir.is_empty());
    }
}
