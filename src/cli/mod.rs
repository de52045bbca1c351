//! CLI entrypoint module structure.
use std::process::ExitCode;

use anyhow::{anyhow, Context, Error, Result};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    desktop::DesktopEntryStatus,
    launch::{ExecHandoff, ProcessHandoff},
    lib::errors::{LaunchError, ProfileError},
    menu::{MenuProgram, SelectionProvider},
    profile::Profile,
};

pub mod args;
pub mod profile;

pub use args::{
    ChooseArgs, Cli, CliCommand, CreatorArgs, DesktopArgs, EditArgs, FromSessionArgs, GlobalArgs,
    LaunchArgs, ListArgs, NewArgs, ParsedCommand,
};
pub use profile::{editor_command, resolve_config_path, resolve_editor, ConfigLocation, RunContext};

/// Bundles a user-facing error message with an exit code.
#[derive(Debug)]
pub struct CliExit {
    message: String,
    hint: Option<&'static str>,
    code: u8,
}

impl CliExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("error: {err:#}"),
            hint: remediation(&err),
            code: 1,
        }
    }

    /// Help and version requests end successfully; real parse errors fail.
    pub fn from_clap(err: clap::Error) -> Self {
        Self {
            message: err.render().to_string(),
            hint: None,
            code: u8::from(err.use_stderr()),
        }
    }

    pub fn report(self) -> ExitCode {
        if self.code == 0 {
            print!("{}", self.message);
        } else {
            eprintln!("{}", self.message.trim_end());
            if let Some(hint) = self.hint {
                eprintln!("hint: {hint}");
            }
        }
        ExitCode::from(self.code)
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn remediation(err: &Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(profile) = cause.downcast_ref::<ProfileError>() {
            return profile.remediation();
        }
        match cause.downcast_ref::<LaunchError>() {
            Some(LaunchError::Profile(profile)) => profile.remediation(),
            _ => None,
        }
    })
}

/// Execute a subcommand and return what should be printed on stdout.
pub async fn execute_cli_command(context: &RunContext, command: CliCommand) -> Result<String> {
    match command {
        CliCommand::New(args) => execute_new(context, args).await,
        CliCommand::FromSession(args) => execute_from_session(context, args).await,
        CliCommand::Desktop(args) => execute_desktop(context, args),
        CliCommand::Launch(args) => {
            let profile = context.profile(&args.profile_name)?;
            launch_profile(context, &profile, !args.new, args.foreground, &args.qb_args).await?;
            Ok(String::new())
        }
        CliCommand::List(args) => execute_list(context, args),
        CliCommand::Choose(args) => execute_choose(context, args).await,
        CliCommand::Edit(args) => execute_edit(context, args, &ExecHandoff),
    }
}

async fn execute_new(context: &RunContext, args: NewArgs) -> Result<String> {
    let profile = context.profile(&args.profile_name)?;
    let profile = context.store().create(
        &profile,
        args.home_page.as_deref(),
        args.creator.desktop_file,
        args.creator.overwrite,
    )?;
    then_launch(context, &profile, &args.creator).await
}

async fn execute_from_session(context: &RunContext, args: FromSessionArgs) -> Result<String> {
    let profile = context.store().import_session(
        &args.session,
        args.profile_name.as_deref(),
        &context.base_dir,
        context.set_app_id,
        args.creator.desktop_file,
        args.creator.overwrite,
    )?;
    then_launch(context, &profile, &args.creator).await
}

/// Second half of `--launch`: a non-strict launch without extra arguments.
async fn then_launch(context: &RunContext, profile: &Profile, creator: &CreatorArgs) -> Result<String> {
    if creator.launch {
        launch_profile(context, profile, false, creator.foreground, &[]).await?;
    }
    Ok(String::new())
}

/// Launch and relay whatever the browser wrote to stderr before returning.
async fn launch_profile(
    context: &RunContext,
    profile: &Profile,
    strict: bool,
    foreground: bool,
    qb_args: &[String],
) -> Result<()> {
    let store = context.store();
    match context
        .launcher()
        .launch(&store, profile, strict, foreground, qb_args)
        .await
    {
        Ok(outcome) => {
            if let Some(stderr) = outcome.stderr() {
                eprint!("{stderr}");
            }
            Ok(())
        }
        Err(LaunchError::EarlyExit { code, stderr }) => {
            eprint!("{stderr}");
            Err(match code {
                Some(code) => anyhow!("qutebrowser exited immediately with status {code}"),
                None => anyhow!("qutebrowser was terminated immediately by a signal"),
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn execute_desktop(context: &RunContext, args: DesktopArgs) -> Result<String> {
    let writer = context.desktop_writer();
    let mut written = Vec::new();
    let mut missing = Vec::new();

    for name in &args.profile_names {
        let profile = context.profile(name)?;
        match writer.write_profile_entry(&profile)? {
            DesktopEntryStatus::Written { path } => written.push(path.display().to_string()),
            DesktopEntryStatus::ProfileMissing { root } => {
                missing.push(format!("profile {name} not found at {}", root.display()))
            }
        }
    }
    if args.choose {
        if let DesktopEntryStatus::Written { path } = writer.write_chooser_entry()? {
            written.push(path.display().to_string());
        }
    }

    if !missing.is_empty() {
        for line in &written {
            println!("{line}");
        }
        return Err(anyhow!(missing.join("; ")));
    }
    Ok(written.join("\n"))
}

fn execute_list(context: &RunContext, args: ListArgs) -> Result<String> {
    let names = context.store().list(&context.base_dir)?;
    if !args.json {
        return Ok(names.join("\n"));
    }

    let payload: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "root": context.base_dir.join(name).to_string_lossy(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&payload)?)
}

async fn execute_choose(context: &RunContext, args: ChooseArgs) -> Result<String> {
    let program = match args.menu.as_deref() {
        Some(name) => name.parse::<MenuProgram>()?,
        None => match context.config.menu.program {
            Some(program) => program,
            None => MenuProgram::detect()?,
        },
    };
    info!(target: "qbpm::menu", menu = program.as_str(), "Selected menu program");

    let names = context.store().list(&context.base_dir)?;
    let provider = program.provider()?;
    let selection = choose_profile(provider.as_ref(), &names, &args.qb_args)?;
    let profile = context.profile(&selection)?;
    launch_profile(context, &profile, true, args.foreground, &args.qb_args).await?;
    Ok(String::new())
}

/// Ask `provider` for one of `names`; the browser arguments serve as the prompt.
pub fn choose_profile(
    provider: &dyn SelectionProvider,
    names: &[String],
    qb_args: &[String],
) -> Result<String> {
    if names.is_empty() {
        return Err(anyhow!(
            "no existing profiles found, create a profile first with qbpm new"
        ));
    }
    provider
        .select(names, &qb_args.join(" "))?
        .ok_or_else(|| anyhow!("no profile selected"))
}

fn execute_edit(context: &RunContext, args: EditArgs, handoff: &dyn ProcessHandoff) -> Result<String> {
    let profile = context.profile(&args.profile_name)?;
    if !profile.exists() {
        return Err(ProfileError::NotFound {
            name: profile.name().to_string(),
            root: profile.root().to_path_buf(),
        }
        .into());
    }

    let editor = resolve_editor(
        std::env::var("VISUAL").ok(),
        std::env::var("EDITOR").ok(),
    )?;
    let config_file = profile.config_file();
    info!(
        target: "qbpm::edit",
        editor = %editor[0],
        path = %config_file.display(),
        "Opening profile config"
    );
    let source = handoff.exec(editor_command(&editor, &config_file));
    warn!(target: "qbpm::edit", editor = %editor[0], "Editor handoff failed");
    Err(Error::new(source)).with_context(|| format!("failed to run editor {}", editor[0]))
}
