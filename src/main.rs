//! Entry point for qbpm.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use qbpm::{
    cli::{execute_cli_command, resolve_config_path, Cli, CliExit, ParsedCommand, RunContext},
    config::AppConfig,
    lib::telemetry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), CliExit> {
    let cli = Cli::try_parse().map_err(CliExit::from_clap)?;
    telemetry::init_tracing(cli.verbose).map_err(CliExit::from_error)?;
    let ParsedCommand { global, command } = cli.into_command().map_err(CliExit::from_error)?;

    let location = resolve_config_path(global.config_override).map_err(CliExit::from_error)?;
    let config = AppConfig::load(&location.path, location.required)
        .map_err(|err| CliExit::from_error(Error::new(err)))?;
    let context =
        RunContext::new(global.profile_dir, global.set_app_id, config).map_err(CliExit::from_error)?;

    let message = execute_cli_command(&context, command)
        .await
        .map_err(CliExit::from_error)?;
    if !message.is_empty() {
        println!("{message}");
    }
    Ok(())
}
