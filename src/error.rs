use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A level source could not be turned into vocabulary entries.
/// Any of these aborts startup: there is no partially loaded mode.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to load {source_name}: no bundled level with that name")]
    MissingBuiltin { source_name: String },

    #[error("unable to load {}: {cause}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("unable to load {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("unable to load {url}: network support is disabled in this build")]
    NetworkDisabled { url: String },

    #[error("unable to load {source_name}: contents are not valid UTF-8")]
    NotUtf8 { source_name: String },

    #[error("loader thread for {source_name} panicked")]
    Panicked { source_name: String },
}

/// Failures inside a key-value backend or while decoding a stored record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed for key '{key}': {cause}")]
    Io {
        key: String,
        #[source]
        cause: io::Error,
    },

    #[error("stored record '{key}' is malformed: {cause}")]
    Parse {
        key: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error("could not encode record '{key}': {cause}")]
    Encode {
        key: String,
        #[source]
        cause: serde_json::Error,
    },
}
