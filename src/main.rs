//! Main application entry point.
//!
//! Parses the command line, fixes the configuration directory for the
//! process, and dispatches to the matching command in `lockcheck::commands`.

use anyhow::Result;

use lockcheck::args::{self, CliAction, ParsedArgs};
use lockcheck::commands;
use lockcheck::config;
use lockcheck::constants::EXIT_FAILURE;
use lockcheck::{log_end, log_error_exit};

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Help { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Show {
            debug_enabled,
            config_dir,
            json,
        } => {
            config::set_config_dir(config_dir)?;
            report(commands::show::handle_show_command(debug_enabled, json))
        }
        CliAction::Lock {
            debug_enabled,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            report(commands::lock::handle_lock_command(debug_enabled))
        }
        CliAction::Edit {
            debug_enabled,
            config_dir,
            value,
        } => {
            config::set_config_dir(config_dir)?;
            report(commands::edit::handle_edit_command(
                debug_enabled,
                value.as_deref(),
            ))
        }
        CliAction::Ui {
            debug_enabled,
            config_dir,
        } => {
            config::set_config_dir(config_dir)?;
            report(commands::ui::run_interactive(debug_enabled, false))
        }
    }
}

/// Log a command failure in the block style and exit with failure status.
fn report(result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        log_error_exit!("{:#}", e);
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}
