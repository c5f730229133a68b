use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;

use crate::error::LoadError;

#[derive(Embed)]
#[folder = "assets/levels/"]
struct LevelAssets;

const BUILTIN_PREFIX: &str = "builtin:";

/// Where a level's text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelSource {
    Builtin(String),
    Url(String),
    File(PathBuf),
}

impl LevelSource {
    /// Interpret a configured source string. Relative paths resolve against `base_dir`.
    pub fn parse(raw: &str, base_dir: &Path) -> Self {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix(BUILTIN_PREFIX) {
            LevelSource::Builtin(name.to_string())
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            LevelSource::Url(raw.to_string())
        } else {
            let path = PathBuf::from(raw);
            if path.is_relative() {
                LevelSource::File(base_dir.join(path))
            } else {
                LevelSource::File(path)
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LevelSource::Builtin(name) => format!("{BUILTIN_PREFIX}{name}"),
            LevelSource::Url(url) => url.clone(),
            LevelSource::File(path) => path.display().to_string(),
        }
    }

    pub fn read_to_string(&self) -> Result<String, LoadError> {
        match self {
            LevelSource::Builtin(name) => {
                let file = LevelAssets::get(name).ok_or_else(|| LoadError::MissingBuiltin {
                    source_name: self.describe(),
                })?;
                String::from_utf8(file.data.into_owned()).map_err(|_| LoadError::NotUtf8 {
                    source_name: self.describe(),
                })
            }
            LevelSource::Url(url) => fetch_url(url),
            LevelSource::File(path) => {
                let bytes = fs::read(path).map_err(|cause| LoadError::Io {
                    path: path.clone(),
                    cause,
                })?;
                String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 {
                    source_name: self.describe(),
                })
            }
        }
    }
}

#[cfg(feature = "network")]
fn fetch_url(url: &str) -> Result<String, LoadError> {
    let http_err = |reason: String| LoadError::Http {
        url: url.to_string(),
        reason,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| http_err(e.to_string()))?;
    let response = client.get(url).send().map_err(|e| http_err(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(http_err(format!("server answered {status}")));
    }
    let bytes = response.bytes().map_err(|e| http_err(e.to_string()))?;
    String::from_utf8(bytes.to_vec()).map_err(|_| LoadError::NotUtf8 {
        source_name: url.to_string(),
    })
}

#[cfg(not(feature = "network"))]
fn fetch_url(url: &str) -> Result<String, LoadError> {
    Err(LoadError::NetworkDisabled {
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognises_each_kind() {
        let base = Path::new("/data");
        assert_eq!(
            LevelSource::parse("builtin:level1.csv", base),
            LevelSource::Builtin("level1.csv".to_string())
        );
        assert_eq!(
            LevelSource::parse("https://example.com/l1.csv", base),
            LevelSource::Url("https://example.com/l1.csv".to_string())
        );
        assert_eq!(
            LevelSource::parse("words/l1.csv", base),
            LevelSource::File(PathBuf::from("/data/words/l1.csv"))
        );
        assert_eq!(
            LevelSource::parse("/abs/l1.csv", base),
            LevelSource::File(PathBuf::from("/abs/l1.csv"))
        );
    }

    #[test]
    fn bundled_levels_are_present() {
        let names: Vec<String> = LevelAssets::iter().map(|f| f.to_string()).collect();
        for n in 1..=6 {
            assert!(names.contains(&format!("level{n}.csv")), "missing level{n}.csv");
        }
    }

    #[test]
    fn missing_builtin_is_an_error() {
        let err = LevelSource::Builtin("nope.csv".to_string())
            .read_to_string()
            .unwrap_err();
        assert!(err.to_string().contains("builtin:nope.csv"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = LevelSource::File(dir.path().join("absent.csv"));
        assert!(matches!(source.read_to_string(), Err(LoadError::Io { .. })));
    }

    #[test]
    fn non_utf8_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, [0xff, 0xfe, 0x2c, 0x41]).unwrap();
        let source = LevelSource::File(path);
        assert!(matches!(source.read_to_string(), Err(LoadError::NotUtf8 { .. })));
    }
}
