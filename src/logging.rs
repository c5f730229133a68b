use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "lexdr.log";

/// Route `tracing` output to `<data_dir>/lexdr.log`; stdout belongs to the UI.
///
/// `RUST_LOG` wins over `verbose`, which selects `debug` instead of `info`.
pub fn init(data_dir: &Path, verbose: bool) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;

    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
    Ok(())
}
