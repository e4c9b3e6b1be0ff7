use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use clap::Parser;
use color_eyre::Result;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;
use walkdir::WalkDir;

use create_pika_app::cli::input::CliArgs;
use create_pika_app::cli::output::commands::{CommandLine, CommandOutput, CommandStatus};
use create_pika_app::cli::output::executors::CommandRunner;
use create_pika_app::error::ScaffoldError;
use create_pika_app::pipeline::Stage;
use create_pika_app::worker::{run_scaffold_with, RunOutcome};

/// Stands in for the package manager: `init` writes a bare manifest, everything else
/// succeeds unless told otherwise
#[derive(Default)]
struct PackageManagerDouble {
    calls: RefCell<Vec<String>>,
    failing_subcommand: Option<&'static str>,
}

impl CommandRunner for PackageManagerDouble {
    fn run(&self, command: &CommandLine) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(command.to_string());
        let subcommand = command.args.first().map(String::as_str);

        if subcommand.is_some() && subcommand == self.failing_subcommand {
            return Ok(CommandOutput::with_status(CommandStatus(Some(1))));
        }
        if let (Some("init"), Some(dir)) = (subcommand, &command.working_dir) {
            let manifest = json!({ "name": "app", "version": "1.0.0", "license": "ISC" });
            fs::write(dir.join("package.json"), manifest.to_string())?;
        }
        Ok(CommandOutput::with_status(CommandStatus::SUCCESS))
    }
}

fn entries_below(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

fn read_manifest(project: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(
        project.join("package.json"),
    )?)?)
}

#[test]
fn test_relative_project_is_created_under_the_working_directory() -> Result<()> {
    let cwd = tempdir()?;
    let runner = PackageManagerDouble::default();

    let outcome = run_scaffold_with(&CliArgs::parse_from(["", "my-app"]), cwd.path(), &runner)?;

    let project = cwd.path().join("my-app");
    assert!(matches!(outcome, RunOutcome::Created { ref target, .. } if target == &project));

    let manifest = read_manifest(&project)?;
    let scripts = manifest["scripts"].as_object().unwrap();
    assert_eq!(scripts.len(), 11);
    assert_eq!(scripts["build"], "pika-web --dest dist/web_modules");
    assert_eq!(scripts["start"], "serve -s dist");
    assert_eq!(
        manifest["@pika/web"]["webDependencies"]
            .as_array()
            .map(Vec::len),
        Some(5)
    );
    assert_eq!(manifest["license"], "ISC");

    assert!(project.join("tsconfig.json").is_file());
    assert!(project.join("src").join("components").join("App.tsx").is_file());

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 3);
    assert!(calls[2].contains(" -D "));

    Ok(cwd.close()?)
}

#[test]
fn test_absolute_project_ignores_the_working_directory() -> Result<()> {
    let cwd = tempdir()?;
    let elsewhere = tempdir()?;
    let absolute = elsewhere.path().join("abs").join("path").join("app");
    let runner = PackageManagerDouble::default();

    let cli = CliArgs::parse_from(["".to_owned(), absolute.to_string_lossy().into_owned()]);
    run_scaffold_with(&cli, cwd.path(), &runner)?;

    assert!(absolute.join("package.json").is_file());
    assert!(entries_below(cwd.path()).is_empty());

    Ok(())
}

#[test]
fn test_second_run_on_the_same_name_fails_without_corrupting() -> Result<()> {
    let cwd = tempdir()?;
    let runner = PackageManagerDouble::default();
    let cli = CliArgs::parse_from(["", "twice"]);

    run_scaffold_with(&cli, cwd.path(), &runner)?;
    let project = cwd.path().join("twice");
    let before = fs::read_to_string(project.join("package.json"))?;
    let tree_before = entries_below(&project);

    let err = run_scaffold_with(&cli, cwd.path(), &runner).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScaffoldError>(),
        Some(ScaffoldError::TargetNotAvailable { .. })
    ));
    assert_eq!(fs::read_to_string(project.join("package.json"))?, before);
    assert_eq!(entries_below(&project), tree_before);
    // Only the first run reached the package manager
    assert_eq!(runner.calls.borrow().len(), 3);

    Ok(())
}

#[test]
fn test_custom_template_tree_is_reproduced() -> Result<()> {
    let cwd = tempdir()?;
    let template = tempdir()?;
    fs::create_dir_all(template.path().join("src").join("assets").join("img"))?;
    fs::write(template.path().join("README.md"), "# app")?;
    fs::write(template.path().join("src").join("index.ts"), "export {}")?;
    fs::write(
        template.path().join("src").join("assets").join("img").join("logo.gif"),
        b"GIF89a",
    )?;
    let runner = PackageManagerDouble::default();

    let cli = CliArgs::parse_from([
        "".to_owned(),
        "templated".to_owned(),
        "--template".to_owned(),
        template.path().to_string_lossy().into_owned(),
    ]);
    let outcome = run_scaffold_with(&cli, cwd.path(), &runner)?;

    let project = cwd.path().join("templated");
    let copied: Vec<PathBuf> = entries_below(&project)
        .into_iter()
        .filter(|p| p != Path::new("package.json"))
        .collect();
    assert_eq!(copied, entries_below(template.path()));

    match outcome {
        RunOutcome::Created { report, .. } => {
            assert_eq!(report.copied.files, 3);
            assert_eq!(report.copied.directories, 3);
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }

    Ok(())
}

#[test]
fn test_failing_package_manager_aborts_the_run() -> Result<()> {
    let cwd = tempdir()?;
    let runner = PackageManagerDouble {
        failing_subcommand: Some("install"),
        ..Default::default()
    };

    let err = run_scaffold_with(&CliArgs::parse_from(["", "broken"]), cwd.path(), &runner)
        .unwrap_err();

    let scaffold_err = err.downcast_ref::<ScaffoldError>().unwrap();
    assert_eq!(scaffold_err.stage(), Some(Stage::InstallDependencies));
    assert_eq!(runner.calls.borrow().len(), 2);

    Ok(())
}

#[test]
fn test_missing_name_and_info_leave_the_file_system_alone() -> Result<()> {
    let cwd = tempdir()?;
    let runner = PackageManagerDouble::default();

    assert_eq!(
        run_scaffold_with(&CliArgs::parse_lenient(["", "--unknown"]), cwd.path(), &runner)?,
        RunOutcome::MissingProjectName
    );
    assert_eq!(
        run_scaffold_with(&CliArgs::parse_from(["", "--info"]), cwd.path(), &runner)?,
        RunOutcome::EnvironmentReported
    );
    assert!(entries_below(cwd.path()).is_empty());

    Ok(())
}

#[test]
fn test_value_of_an_unknown_option_is_not_the_project_name() -> Result<()> {
    let cwd = tempdir()?;
    let runner = PackageManagerDouble::default();

    let cli = CliArgs::parse_lenient(["", "--use-npm", "yes", "app", "-vx"]);
    run_scaffold_with(&cli, cwd.path(), &runner)?;

    assert_eq!(entries_below(cwd.path())[0], PathBuf::from("app"));
    assert!(!cwd.path().join("yes").exists());
    assert_eq!(cli.verbose, 1);

    Ok(())
}

#[test]
fn test_binary_without_a_project_name() -> Result<()> {
    let cwd = tempdir()?;

    Command::cargo_bin("create-pika-app")?
        .current_dir(cwd.path())
        .arg("--some-unknown-flag")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Please specify the project name"));

    assert!(entries_below(cwd.path()).is_empty());
    Ok(())
}

#[test]
fn test_binary_help() -> Result<()> {
    Command::cargo_bin("create-pika-app")?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<project-directory>"))
        .stdout(predicate::str::contains(
            "https://github.com/ndom91/create-pika-app/issues/new",
        ));
    Ok(())
}

#[test]
fn test_binary_info_report() -> Result<()> {
    let cwd = tempdir()?;

    Command::cargo_bin("create-pika-app")?
        .current_dir(cwd.path())
        .arg("--info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment Info:"))
        .stdout(predicate::str::contains("OS: "))
        .stdout(predicate::str::contains("CPU: "))
        .stdout(predicate::str::contains("preact"));

    assert!(entries_below(cwd.path()).is_empty());
    Ok(())
}
