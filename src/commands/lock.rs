//! Lock command: record the current moment.

use anyhow::Result;

/// Handle the lock command.
pub fn handle_lock_command(debug_enabled: bool) -> Result<()> {
    log_version!();
    let (_config, mut presenter) = super::open_presenter(debug_enabled)?;

    presenter.handle_lock()?;

    log_block_start!("Recorded");
    log_decorated!("{}", presenter.display().text);
    log_end!();

    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("lock - Record the current moment as last locked");
    log_block_start!("Usage: lockcheck lock");
    log_decorated!("Overwrites any previous record.");
    log_end!();
}
