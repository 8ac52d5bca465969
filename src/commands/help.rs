//! Help command implementation for lockcheck.
//!
//! Dispatches to command-specific help, or prints the command overview.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("show") | Some("s") => super::show::display_help(),
        Some("lock") | Some("l") => super::lock::display_help(),
        Some("edit") | Some("e") => super::edit::display_help(),
        Some("ui") | Some("u") => display_ui_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("show, s              Show when you last locked (default)");
    log_indented!("lock, l              Record the current moment as last locked");
    log_indented!("edit, e [DATETIME]   Change the recorded moment");
    log_indented!("ui, u                Interactive screen");
    log_indented!("help, h [COMMAND]    Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'lockcheck help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'lockcheck --help' to see all options and general usage.");
    log_end!();
}

fn display_ui_help() {
    log_version!();
    log_block_start!("ui - Interactive screen");
    log_block_start!("Usage: lockcheck ui");
    log_block_start!("Keys:");
    log_indented!("l        Record the current moment");
    log_indented!("e        Open the edit dialog (only once something is recorded)");
    log_indented!("q, Esc   Quit");
    log_block_start!("In the edit dialog:");
    log_indented!("Enter    Save (YYYY-MM-DDTHH:MM)");
    log_indented!("Esc      Cancel");
    log_indented!("Ctrl+U   Clear the input");
    log_indented!("Click outside the dialog to close it (mouse = true in the config)");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: lockcheck help [COMMAND]");
    log_block_start!("Examples:");
    log_indented!("lockcheck help");
    log_indented!("lockcheck help edit");
    log_end!();
}
