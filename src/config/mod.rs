//! Configuration system for lockcheck.
//!
//! Configuration is optional. Without a file every setting takes its default,
//! and the first run in the default location writes a commented template.
//!
//! ## Configuration Sources
//!
//! 1. The directory passed with `--config <dir>` (must already exist)
//! 2. **XDG_CONFIG_HOME**/lockcheck/lockcheck.toml
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Storage]
//! storage_dir = "~/.local/state/lockcheck/default"  # Where the lock record lives
//!
//! #[Interface]
//! mouse = true   # Click outside the edit dialog to dismiss it
//! ```

pub mod builder;
pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests;

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::utils::{expand_tilde, private_path};

pub use builder::create_default_config;
pub use loading::{get_custom_config_dir, load, load_from_path, set_config_dir};

pub const DEFAULT_MOUSE: bool = true;

/// Settings loaded from `lockcheck.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Explicit directory for the storage slot.
    ///
    /// When unset, the slot lives in the XDG state directory, namespaced by
    /// the active configuration directory.
    pub storage_dir: Option<String>,

    /// Whether the interactive screen captures the mouse so that a click on
    /// the backdrop dismisses the edit dialog.
    pub mouse: Option<bool>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        load()
    }

    /// Configured storage directory with `~/` expanded.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.as_deref().map(expand_tilde)
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse.unwrap_or(DEFAULT_MOUSE)
    }

    /// Print the effective settings as an indented block.
    pub fn log_config(&self) {
        log_block_start!("Configuration");
        match self.storage_dir() {
            Some(dir) => log_indented!("storage_dir: {}", private_path(&dir)),
            None => log_indented!("storage_dir: (state directory)"),
        }
        log_indented!("mouse: {}", self.mouse_enabled());
    }
}
