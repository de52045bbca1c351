//! CLI argument definitions.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::menu::MenuProgram;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "qbpm",
    author,
    version,
    about = "qutebrowser profile manager",
    long_about = None
)]
pub struct Cli {
    /// Directory in which profiles are stored (overrides QBPM_PROFILE_DIR).
    #[arg(short = 'P', long = "profile-dir", value_name = "DIRECTORY", global = true)]
    pub profile_dir: Option<PathBuf>,
    /// Set the Wayland app_id to the profile's name. Requires qutebrowser v2.0.0+.
    #[arg(long, default_value_t = false, global = true)]
    pub set_app_id: bool,
    /// Path to config.toml (overrides QBPM_CONFIG_PATH).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_override: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Create a new profile.
    New(NewArgs),
    /// Create a new profile from a qutebrowser session.
    FromSession(FromSessionArgs),
    /// Create desktop files for existing profiles.
    Desktop(DesktopArgs),
    /// Launch qutebrowser with the given profile.
    #[command(visible_alias = "run")]
    Launch(LaunchArgs),
    /// List existing profiles.
    List(ListArgs),
    /// Choose a profile using rofi, dmenu, or an AppleScript dialog.
    Choose(ChooseArgs),
    /// Edit a profile's config.py using $VISUAL or $EDITOR.
    Edit(EditArgs),
}

/// Flags shared by the profile-creating commands.
#[derive(Debug, Clone, Args)]
pub struct CreatorArgs {
    /// Launch the profile after creating it.
    #[arg(short, long, default_value_t = false)]
    pub launch: bool,
    /// With --launch, run qutebrowser in the foreground.
    #[arg(short, long, default_value_t = false)]
    pub foreground: bool,
    /// Do not generate a desktop file for the profile.
    #[arg(long = "no-desktop-file", action = ArgAction::SetFalse)]
    pub desktop_file: bool,
    /// Reuse an existing profile directory.
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// Arguments for `new`.
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Name of the new profile.
    #[arg(value_name = "PROFILE")]
    pub profile_name: String,
    /// The profile's home page.
    #[arg(value_name = "URL")]
    pub home_page: Option<String>,
    #[command(flatten)]
    pub creator: CreatorArgs,
}

/// Arguments for `from-session`.
#[derive(Debug, Clone, Args)]
pub struct FromSessionArgs {
    /// Path to a session file (ending in .yml) or the name of a saved session.
    pub session: String,
    /// Name of the new profile; defaults to the session name.
    #[arg(value_name = "PROFILE")]
    pub profile_name: Option<String>,
    #[command(flatten)]
    pub creator: CreatorArgs,
}

/// Arguments for `desktop`.
#[derive(Debug, Clone, Args)]
pub struct DesktopArgs {
    /// Also write a desktop entry that prompts for a profile.
    #[arg(short, long, default_value_t = false)]
    pub choose: bool,
    /// Profiles to write desktop files for.
    #[arg(value_name = "PROFILE")]
    pub profile_names: Vec<String>,
}

/// Arguments for `launch`.
#[derive(Debug, Clone, Args)]
pub struct LaunchArgs {
    /// Profile to launch.
    #[arg(value_name = "PROFILE")]
    pub profile_name: String,
    /// Create the profile if it does not exist.
    #[arg(short, long, default_value_t = false)]
    pub new: bool,
    /// Run qutebrowser in the foreground, attached to this terminal.
    #[arg(short, long, default_value_t = false)]
    pub foreground: bool,
    /// Arguments passed to qutebrowser verbatim.
    #[arg(
        value_name = "QB_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub qb_args: Vec<String>,
}

/// Arguments for `list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Print a JSON array of {name, root} objects.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments for `choose`.
#[derive(Debug, Clone, Args)]
pub struct ChooseArgs {
    /// Menu program: rofi, dmenu or applescript.
    #[arg(short, long, value_name = "MENU")]
    pub menu: Option<String>,
    /// Run qutebrowser in the foreground, attached to this terminal.
    #[arg(short, long, default_value_t = false)]
    pub foreground: bool,
    /// Arguments passed to qutebrowser verbatim.
    #[arg(
        value_name = "QB_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub qb_args: Vec<String>,
}

/// Arguments for `edit`.
#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Profile to edit.
    #[arg(value_name = "PROFILE")]
    pub profile_name: String,
}

/// Global settings separated from the command to run.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub profile_dir: Option<PathBuf>,
    pub set_app_id: bool,
    pub config_override: Option<PathBuf>,
}

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub global: GlobalArgs,
    pub command: CliCommand,
}

impl Cli {
    /// Validate the arguments and split them into global settings and the command.
    pub fn into_command(self) -> Result<ParsedCommand> {
        validate_command(&self.command)?;
        Ok(ParsedCommand {
            global: GlobalArgs {
                profile_dir: self.profile_dir,
                set_app_id: self.set_app_id,
                config_override: self.config_override,
            },
            command: self.command,
        })
    }
}

fn validate_command(command: &CliCommand) -> Result<()> {
    match command {
        CliCommand::Desktop(args) if !args.choose && args.profile_names.is_empty() => Err(
            anyhow!("nothing to do: name at least one profile or pass --choose"),
        ),
        CliCommand::Choose(ChooseArgs {
            menu: Some(menu), ..
        }) => {
            menu.parse::<MenuProgram>()?;
            Ok(())
        }
        CliCommand::New(args) if args.creator.foreground && !args.creator.launch => {
            Err(anyhow!("--foreground only applies together with --launch"))
        }
        CliCommand::FromSession(args) if args.creator.foreground && !args.creator.launch => {
            Err(anyhow!("--foreground only applies together with --launch"))
        }
        _ => Ok(()),
    }
}
