//! Show command: print the last locked moment.

use anyhow::Result;

/// Handle the show command.
///
/// # Arguments
/// * `debug_enabled` - Log config and storage details first
/// * `json` - Print the `DisplayState` as JSON instead of the decorated line
pub fn handle_show_command(debug_enabled: bool, json: bool) -> Result<()> {
    if json {
        // Clean output for scripts: nothing but the JSON document
        let _quiet = crate::logger::QuietGuard::new();
        let (_config, presenter) = super::open_presenter(false)?;
        println!("{}", serde_json::to_string_pretty(presenter.display())?);
        return Ok(());
    }

    log_version!();
    let (_config, presenter) = super::open_presenter(debug_enabled)?;
    let display = presenter.display();

    log_block_start!("{}", display.text);
    if !display.has_record() {
        log_indented!("Run 'lockcheck lock' after locking up");
    }
    log_end!();

    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("show - Show when you last locked");
    log_block_start!("Usage: lockcheck show [--json]");
    log_block_start!("Options:");
    log_indented!("-j, --json   Print text, edit availability and the raw moment as JSON");
    log_block_start!("Examples:");
    log_indented!("lockcheck");
    log_indented!("lockcheck show --json");
    log_end!();
}
