//! Persistent state for lockcheck, following XDG Base Directory standards.
//!
//! The only persisted value is the last locked moment. It lives in
//! XDG_STATE_HOME, separate from configuration, in a namespace tied to the
//! configuration directory in use so that `--config` profiles keep their own
//! record.

pub mod display;
pub mod store;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{Config, get_custom_config_dir};
use crate::constants::APP_DIR_NAME;

pub use display::{DisplayState, format_display, format_edit_input};
pub use store::{FileSlotStorage, MemorySlotStorage, SlotStorage, TimestampStore};

/// Get the state directory for a given configuration directory.
///
/// State is stored in XDG_STATE_HOME/lockcheck/{namespace} where namespace is:
/// - "default" for the default config directory
/// - "custom_<hash>" for custom config directories (via --config)
pub fn get_state_dir(config_dir: Option<&Path>) -> Result<PathBuf> {
    let state_home = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local/state")
        });

    let state_base = state_home.join(APP_DIR_NAME);

    let namespace = match config_dir {
        None => "default".to_string(),
        Some(path) => {
            let default_config = dirs::config_dir()
                .context("Could not determine config directory")?
                .join(APP_DIR_NAME);
            if path == default_config {
                "default".to_string()
            } else {
                get_state_namespace(path)
            }
        }
    };

    Ok(state_base.join(namespace))
}

/// Generate a stable namespace for a custom config directory.
fn get_state_namespace(config_path: &Path) -> String {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());

    // SHA256 truncated to 16 hex chars
    let hash = sha256::digest(canonical.to_string_lossy().as_bytes());
    format!("custom_{}", &hash[..16])
}

/// Directory holding the storage slot for this process.
///
/// An explicit `storage_dir` in the config wins over the XDG location.
pub fn resolve_storage_dir(config: &Config) -> Result<PathBuf> {
    match config.storage_dir() {
        Some(dir) => Ok(dir),
        None => get_state_dir(get_custom_config_dir().as_deref()),
    }
}

/// Open the file-backed timestamp store described by `config`.
pub fn open_store(config: &Config) -> Result<TimestampStore<FileSlotStorage>> {
    let dir = resolve_storage_dir(config)?;
    Ok(TimestampStore::new(FileSlotStorage::new(dir)))
}
