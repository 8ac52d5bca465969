//! Command-line argument parsing and processing.
//!
//! Turns `std::env::args()` into a [`CliAction`]. Global flags may appear
//! anywhere; the first bare word selects the command and any further bare
//! words are that command's arguments.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Print the current display line (default when no command is given)
    Show {
        debug_enabled: bool,
        config_dir: Option<String>,
        json: bool,
    },
    /// Record the current moment
    Lock {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Edit the recorded moment; interactive when `value` is None
    Edit {
        debug_enabled: bool,
        config_dir: Option<String>,
        value: Option<String>,
    },
    /// Interactive screen
    Ui {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Help for one command, or the command overview
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit with failure
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments, program name first
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut json = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut config_dir: Option<String> = None;
        let mut positionals: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = &args_vec[i];
            match arg.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" => {
                    if i + 1 < args_vec.len() && !args_vec[i + 1].starts_with('-') {
                        config_dir = Some(args_vec[i + 1].clone());
                        i += 1;
                    } else {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        return Self::error();
                    }
                }
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    log_warning!("Unknown option: {}", arg);
                    return Self::error();
                }
                _ => positionals.push(arg.clone()),
            }
            i += 1;
        }

        // Help and version take precedence over everything else
        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let (command, rest) = match positionals.split_first() {
            Some((command, rest)) => (Some(command.as_str()), rest),
            None => (None, &[][..]),
        };

        if json && !matches!(command, None | Some("show" | "s")) {
            log_warning!("--json is only supported by the show command");
            return Self::error();
        }

        let action = match command {
            None | Some("show" | "s") => {
                if !rest.is_empty() {
                    return Self::unexpected_arguments("show", rest);
                }
                CliAction::Show {
                    debug_enabled,
                    config_dir,
                    json,
                }
            }
            Some("lock" | "l") => {
                if !rest.is_empty() {
                    return Self::unexpected_arguments("lock", rest);
                }
                CliAction::Lock {
                    debug_enabled,
                    config_dir,
                }
            }
            Some("edit" | "e") => {
                // "2024-03-06 10:00" may arrive as two words when unquoted
                if rest.len() > 2 {
                    return Self::unexpected_arguments("edit", &rest[2..]);
                }
                let value = if rest.is_empty() {
                    None
                } else {
                    Some(rest.join(" "))
                };
                CliAction::Edit {
                    debug_enabled,
                    config_dir,
                    value,
                }
            }
            Some("ui" | "u") => {
                if !rest.is_empty() {
                    return Self::unexpected_arguments("ui", rest);
                }
                CliAction::Ui {
                    debug_enabled,
                    config_dir,
                }
            }
            Some("help" | "h") => {
                if rest.len() > 1 {
                    return Self::unexpected_arguments("help", &rest[1..]);
                }
                CliAction::Help {
                    command: rest.first().cloned(),
                }
            }
            Some(unknown) => {
                log_warning!("Unknown command: {}", unknown);
                return Self::error();
            }
        };

        ParsedArgs { action }
    }

    /// Parse from the process arguments.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }

    fn error() -> ParsedArgs {
        ParsedArgs {
            action: CliAction::ShowHelpDueToError,
        }
    }

    fn unexpected_arguments(command: &str, extra: &[String]) -> ParsedArgs {
        log_warning!(
            "Unexpected arguments for {}: {}",
            command,
            extra.join(" ")
        );
        Self::error()
    }
}

/// Display version information.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Display general usage.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: lockcheck [OPTIONS] [COMMAND]");
    log_block_start!("Commands:");
    log_indented!("show, s              Show when you last locked (default)");
    log_indented!("lock, l              Record the current moment as last locked");
    log_indented!("edit, e [DATETIME]   Change the recorded moment (YYYY-MM-DDTHH:MM)");
    log_indented!("                     Without DATETIME, opens the edit dialog");
    log_indented!("ui, u                Interactive screen");
    log_indented!("help, h [COMMAND]    Show detailed help for a command");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>   Use a custom configuration directory");
    log_indented!("-d, --debug          Show storage paths and handler details");
    log_indented!("-j, --json           Print the display state as JSON (show)");
    log_indented!("-h, --help           Print help information");
    log_indented!("-V, --version        Print version information");
    log_end!();
}
