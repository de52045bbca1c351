//! Interactive profile selection through external menu programs.
use std::{
    io::Write,
    process::{Command, Stdio},
    str::FromStr,
};

use tracing::debug;

use crate::lib::errors::MenuError;

const MENU_PROMPT: &str = "qutebrowser";

/// Picks one profile name out of a candidate list.
pub trait SelectionProvider {
    /// Returns `None` when the user dismissed the menu without choosing.
    fn select(&self, candidates: &[String], message: &str) -> Result<Option<String>, MenuError>;
}

/// Menu programs known to `qbpm choose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuProgram {
    Rofi,
    Dmenu,
    AppleScript,
}

impl MenuProgram {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MenuProgram::Rofi => "rofi",
            MenuProgram::Dmenu => "dmenu",
            MenuProgram::AppleScript => "applescript",
        }
    }

    /// Executable that has to be on `PATH`.
    pub const fn binary(&self) -> &'static str {
        match self {
            MenuProgram::Rofi => "rofi",
            MenuProgram::Dmenu => "dmenu",
            MenuProgram::AppleScript => "osascript",
        }
    }

    /// AppleScript on macOS, otherwise the first of rofi and dmenu on `PATH`.
    pub fn detect() -> Result<Self, MenuError> {
        if cfg!(target_os = "macos") {
            return Ok(MenuProgram::AppleScript);
        }
        [MenuProgram::Rofi, MenuProgram::Dmenu]
            .into_iter()
            .find(|menu| which::which(menu.binary()).is_ok())
            .ok_or(MenuError::NoMenuFound)
    }

    /// Check platform support and installation, then build the provider.
    pub fn provider(self) -> Result<Box<dyn SelectionProvider>, MenuError> {
        if self == MenuProgram::AppleScript && !cfg!(target_os = "macos") {
            return Err(MenuError::Unsupported {
                name: self.as_str(),
                platform: std::env::consts::OS,
            });
        }
        if which::which(self.binary()).is_err() {
            return Err(MenuError::NotInstalled {
                name: self.binary(),
            });
        }

        Ok(match self {
            MenuProgram::Rofi => Box::new(Rofi),
            MenuProgram::Dmenu => Box::new(Dmenu),
            MenuProgram::AppleScript => Box::new(AppleScript),
        })
    }
}

impl FromStr for MenuProgram {
    type Err = MenuError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "rofi" => Ok(MenuProgram::Rofi),
            "dmenu" => Ok(MenuProgram::Dmenu),
            "applescript" => Ok(MenuProgram::AppleScript),
            other => Err(MenuError::InvalidMenuSelection {
                name: other.to_string(),
            }),
        }
    }
}

/// `rofi -dmenu` reading candidates from stdin.
#[derive(Debug, Clone, Copy)]
pub struct Rofi;

impl Rofi {
    fn command(message: &str) -> Command {
        let mut command = Command::new("rofi");
        command.args(["-dmenu", "-no-custom", "-p", MENU_PROMPT]);
        if !message.is_empty() {
            command.arg("-mesg").arg(message);
        }
        command
    }
}

impl SelectionProvider for Rofi {
    fn select(&self, candidates: &[String], message: &str) -> Result<Option<String>, MenuError> {
        run_menu("rofi", Rofi::command(message), Some(candidates.join("\n")))
    }
}

/// `dmenu` reading candidates from stdin.
#[derive(Debug, Clone, Copy)]
pub struct Dmenu;

impl SelectionProvider for Dmenu {
    fn select(&self, candidates: &[String], _message: &str) -> Result<Option<String>, MenuError> {
        let mut command = Command::new("dmenu");
        command.args(["-p", MENU_PROMPT]);
        run_menu("dmenu", command, Some(candidates.join("\n")))
    }
}

/// `osascript` showing a `choose from list` dialog.
#[derive(Debug, Clone, Copy)]
pub struct AppleScript;

impl AppleScript {
    fn script(candidates: &[String], message: &str) -> String {
        let items = candidates
            .iter()
            .map(|candidate| format!("\"{}\"", escape_applescript(candidate)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "set profiles to {{{items}}}\n\
             set choice to choose from list profiles with prompt \"{MENU_PROMPT}: {}\" default items {{item 1 of profiles}}\n\
             if choice is false then return \"\"\n\
             item 1 of choice",
            escape_applescript(message)
        )
    }
}

impl SelectionProvider for AppleScript {
    fn select(&self, candidates: &[String], message: &str) -> Result<Option<String>, MenuError> {
        let mut command = Command::new("osascript");
        command.arg("-e").arg(AppleScript::script(candidates, message));
        run_menu("applescript", command, None)
    }
}

fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Run a menu command, feeding `input` on stdin, and read the selection.
fn run_menu(
    name: &'static str,
    mut command: Command,
    input: Option<String>,
) -> Result<Option<String>, MenuError> {
    command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    let mut child = command
        .spawn()
        .map_err(|source| MenuError::Io { name, source })?;

    if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
        stdin
            .write_all(format!("{input}\n").as_bytes())
            .map_err(|source| MenuError::Io { name, source })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|source| MenuError::Io { name, source })?;
    debug!(
        target: "qbpm::menu",
        menu = name,
        exit_code = output.status.code(),
        "Menu closed"
    );
    if !output.status.success() {
        return Ok(None);
    }
    Ok(parse_selection(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_selection(stdout: &str) -> Option<String> {
    let selection = stdout.trim_end_matches(['\n', '\r']);
    (!selection.is_empty()).then(|| selection.to_string())
}
