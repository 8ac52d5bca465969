//! Edit command: change the recorded moment.
//!
//! With a value the edit dialog is driven non-interactively: open, save,
//! report. Without one the interactive screen starts with the dialog open.

use anyhow::Result;

use crate::constants::{EDIT_INPUT_HINT, EXIT_FAILURE};
use crate::presenter::SaveOutcome;

/// Handle the edit command.
///
/// # Arguments
/// * `debug_enabled` - Log config, storage and handler details
/// * `value` - New moment as typed by the user, or None for the dialog
pub fn handle_edit_command(debug_enabled: bool, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return super::ui::run_interactive(debug_enabled, true);
    };

    log_version!();
    let (_config, mut presenter) = super::open_presenter(debug_enabled)?;

    if !presenter.handle_edit_open()? {
        log_error_exit!("Nothing recorded yet, so there is nothing to edit");
        log_indented!("Run 'lockcheck lock' first");
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }

    if debug_enabled && let Some(form) = presenter.edit_form_mut() {
        log_debug!("Current value: {}", form.input());
    }

    match presenter.handle_save(value)? {
        SaveOutcome::Saved(_) => {
            log_block_start!("Updated");
            log_decorated!("{}", presenter.display().text);
            log_end!();
            Ok(())
        }
        SaveOutcome::Rejected(invalid) => {
            let message = presenter
                .take_alert()
                .map(|alert| alert.message())
                .unwrap_or_default();
            log_error_exit!("{}", message);
            log_indented!("Got '{}', expected {}", invalid.input, EDIT_INPUT_HINT);
            log_indented!("Unchanged: {}", presenter.display().text);
            log_end!();
            std::process::exit(EXIT_FAILURE);
        }
    }
}

pub fn display_help() {
    log_version!();
    log_block_start!("edit - Change the recorded moment");
    log_block_start!("Usage: lockcheck edit [DATETIME]");
    log_block_start!("Arguments:");
    log_indented!("DATETIME  New moment in local time, YYYY-MM-DDTHH:MM");
    log_indented!("          Seconds are not kept; the record is saved at :00");
    log_indented!("          If omitted, opens the edit dialog");
    log_block_start!("Examples:");
    log_indented!("lockcheck edit 2024-03-06T10:00");
    log_indented!("lockcheck edit \"2024-03-06 10:00\"");
    log_indented!("lockcheck edit");
    log_end!();
}
