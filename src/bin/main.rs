use std::process::ExitCode;

use color_eyre::{eyre::Context, Result};
use create_pika_app::{
    cli::input::CliArgs,
    utils::{constants::error_messages, logger::config_logger},
    worker::{run_scaffold, RunOutcome},
};
use env_logger::Target;

/// The entry point for the binary generated
/// for the program
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse_lenient(std::env::args_os());
    config_logger(cli_args.verbose, Target::Stderr)?;
    log::debug!("Launching a new create-pika-app program");

    let cwd = std::env::current_dir().with_context(|| error_messages::FAILURE_GATHERING_CWD)?;
    let outcome = run_scaffold(&cli_args, &cwd)?;
    log::debug!("Tasks finished: {outcome:?}");

    Ok(match outcome {
        RunOutcome::MissingProjectName => ExitCode::from(2),
        RunOutcome::Created { .. } | RunOutcome::EnvironmentReported => ExitCode::SUCCESS,
    })
}
