//! Command-line command handlers for lockcheck.
//!
//! Each command lives in its own submodule. They all share the same setup:
//! load configuration, open the storage slot, and build a [`Presenter`]
//! around the real clock.

pub mod edit;
pub mod help;
pub mod lock;
pub mod show;
pub mod ui;

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::presenter::Presenter;
use crate::state::{FileSlotStorage, open_store};
use crate::time_source::RealTimeSource;
use crate::utils::private_path;

/// Load the config and build a presenter over the file-backed store.
pub(crate) fn open_presenter(debug_enabled: bool) -> Result<(Config, Presenter<FileSlotStorage>)> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    if debug_enabled {
        config.log_config();
        log_pipe!();
        log_debug!(
            "Storage slot: {}",
            private_path(&store.storage().item_path(crate::constants::STORAGE_KEY))
        );
    }

    let presenter = Presenter::new(store, Arc::new(RealTimeSource))?.with_debug(debug_enabled);
    Ok((config, presenter))
}
