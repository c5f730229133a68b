use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// File-backed store: each key lives in `<base_dir>/<key>.json`.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.file_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(cause) => Err(StoreError::Io {
                key: key.to_string(),
                cause,
            }),
        }
    }

    /// Write to a temp file, sync, then rename over the old value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("json.tmp");

        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|cause| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io {
                key: key.to_string(),
                cause,
            }
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexdr")
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
