mod config;
mod kv;
mod poems;
mod sqlite;

pub use config::{Config, ExportConfig, NotificationsConfig, ProgressConfig, TimerConfig};
pub use kv::{KvStore, MemoryStore};
pub use poems::{PoemStore, SAVED_POEMS_KEY};
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the Quillfit data directory, creating it if needed.
///
/// `QUILLFIT_DATA_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/quillfit/`, or `~/.config/quillfit-dev/` when
/// `QUILLFIT_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("QUILLFIT_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("QUILLFIT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("quillfit-dev")
            } else {
                base_dir.join("quillfit")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
