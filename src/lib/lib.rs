pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod project_model;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::path::{Path, PathBuf};

    use color_eyre::{eyre::Context, Result};

    use crate::{
        cli::{
            input::CliArgs,
            output::executors::{CommandRunner, SystemRunner},
        },
        diagnostics,
        error::ScaffoldError,
        pipeline::{Pipeline, PipelineReport},
        project_model::{ProjectRequest, ScaffoldOptions},
        utils::{
            constants::{error_messages, CREATE_PIKA_APP, EXAMPLE_PROJECT_NAME},
            template::resolve_template_source,
        },
    };

    /// How a run finished, when it didn't fail
    #[derive(Debug, PartialEq, Eq)]
    pub enum RunOutcome {
        /// The project was fully created at the given path
        Created {
            target: PathBuf,
            report: PipelineReport,
        },
        /// No project name was given, so nothing was attempted
        MissingProjectName,
        /// `--info` was given and the environment report was printed instead
        EnvironmentReported,
    }

    /// The main work of the project. Runs the tasks inputted in the CLI, resolving
    /// relative project names against `cwd`
    pub fn run_scaffold(cli_args: &CliArgs, cwd: &Path) -> Result<RunOutcome> {
        run_scaffold_with(cli_args, cwd, &SystemRunner)
    }

    /// Same as [`run_scaffold`], but every external command goes through `runner`
    pub fn run_scaffold_with(
        cli_args: &CliArgs,
        cwd: &Path,
        runner: &dyn CommandRunner,
    ) -> Result<RunOutcome> {
        if cli_args.info {
            diagnostics::print_environment_info(runner, cwd)
                .with_context(|| error_messages::FAILURE_GATHERING_ENV_INFO)?;
            return Ok(RunOutcome::EnvironmentReported);
        }

        let request = match ProjectRequest::from_cli(cli_args) {
            Ok(request) => request,
            Err(ScaffoldError::MissingProjectName) => {
                print_missing_project_name();
                return Ok(RunOutcome::MissingProjectName);
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("Project request: {request:?}");

        let options = ScaffoldOptions::from(cli_args);
        let template = resolve_template_source(options.template.as_deref())?;
        let target = request.target_dir(cwd);

        let report = Pipeline::new(runner, &*template, &options)
            .run(&request, &target)
            .with_context(|| error_messages::FAILURE_CREATING_PROJECT)?;

        println!();
        println!("Application ready at {}!", target.display());
        println!();
        println!("✔️  Complete!");

        Ok(RunOutcome::Created { target, report })
    }

    fn print_missing_project_name() {
        println!("Please specify the project name:");
        println!("  {CREATE_PIKA_APP} <project-directory>");
        println!();
        println!("For example:");
        println!("  {CREATE_PIKA_APP} {EXAMPLE_PROJECT_NAME}");
        println!();
        println!("Run {CREATE_PIKA_APP} --help to see all options.");
    }

    #[cfg(test)]
    mod tests {
        use std::fs;

        use clap::Parser;
        use color_eyre::Result;
        use serde_json::Value;
        use tempfile::tempdir;

        use super::*;
        use crate::pipeline::Stage;
        use crate::utils::{self, constants::MANIFEST_FILE_NAME, test::FakeRunner};

        #[test]
        fn test_missing_name_touches_nothing() -> Result<()> {
            let temp = tempdir()?;
            let runner = FakeRunner::default();

            let outcome = run_scaffold_with(&CliArgs::parse_from([""]), temp.path(), &runner)?;

            assert_eq!(outcome, RunOutcome::MissingProjectName);
            assert!(fs::read_dir(temp.path())?.next().is_none());
            assert!(runner.calls().is_empty());
            Ok(())
        }

        #[test]
        fn test_info_takes_precedence_over_the_name() -> Result<()> {
            let temp = tempdir()?;
            let runner = FakeRunner::default();

            let outcome = run_scaffold_with(
                &CliArgs::parse_from(["", "my-app", "--info"]),
                temp.path(),
                &runner,
            )?;

            assert_eq!(outcome, RunOutcome::EnvironmentReported);
            assert!(!temp.path().join("my-app").exists());
            Ok(())
        }

        #[test]
        fn test_relative_name_is_created_under_cwd() -> Result<()> {
            let temp = tempdir()?;
            let runner = FakeRunner::default();

            let outcome =
                run_scaffold_with(&CliArgs::parse_from(["", "my-app"]), temp.path(), &runner)?;

            let expected = temp.path().join("my-app");
            match outcome {
                RunOutcome::Created { target, report } => {
                    assert_eq!(target, expected);
                    assert_eq!(report.completed, Stage::ALL.to_vec());
                }
                other => panic!("Unexpected outcome: {other:?}"),
            }

            let manifest: Value =
                utils::fs::load_and_deserialize(&expected.join(MANIFEST_FILE_NAME))?;
            assert_eq!(manifest["scripts"]["start"], "serve -s dist");
            Ok(())
        }
    }
}
