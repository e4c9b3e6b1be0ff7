//! The ordered stages that turn an empty path into a ready to use project.
//!
//! Stages run strictly one after the other and the first failure aborts the run: there
//! are no retries and nothing already written is rolled back.

use std::fmt::{self, Display};
use std::path::Path;

use color_eyre::{eyre::Context, Result};

use crate::cli::output::commands::{CommandLine, CommandOutput};
use crate::cli::output::executors::CommandRunner;
use crate::error::ScaffoldError;
use crate::project_model::manifest::ManifestPatch;
use crate::project_model::package_manager::PackageManager;
use crate::project_model::{ProjectRequest, ScaffoldOptions};
use crate::utils::{
    self,
    constants::{
        CREATE_PIKA_APP, DEPENDENCIES, DEPENDENCIES_HEADLINE, DEV_DEPENDENCIES,
        DEV_DEPENDENCIES_HEADLINE,
        MANIFEST_FILE_NAME,
    },
    template::{CopyReport, TemplateSource, TransferMode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CreateDirectory,
    InitManifest,
    CopyTemplates,
    InstallDependencies,
    InstallDevDependencies,
}

impl Stage {
    /// Every stage, in execution order
    pub const ALL: [Stage; 5] = [
        Stage::CreateDirectory,
        Stage::InitManifest,
        Stage::CopyTemplates,
        Stage::InstallDependencies,
        Stage::InstallDevDependencies,
    ];

    pub fn is_install(&self) -> bool {
        matches!(
            self,
            Stage::InstallDependencies | Stage::InstallDevDependencies
        )
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CreateDirectory => "create directory",
            Stage::InitManifest => "init manifest",
            Stage::CopyTemplates => "copy templates",
            Stage::InstallDependencies => "install dependencies",
            Stage::InstallDevDependencies => "install dev dependencies",
        };
        write!(f, "{name}")
    }
}

/// What a finished run went through
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub completed: Vec<Stage>,
    pub copied: CopyReport,
}

pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    template: &'a dyn TemplateSource,
    package_manager: PackageManager,
    skip_install: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        template: &'a dyn TemplateSource,
        options: &ScaffoldOptions,
    ) -> Self {
        Self {
            runner,
            template,
            package_manager: options.package_manager,
            skip_install: options.skip_install,
        }
    }

    /// Runs every stage against `target`, halting on the first error
    pub fn run(&self, request: &ProjectRequest, target: &Path) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        for stage in Stage::ALL {
            if self.skip_install && stage.is_install() {
                log::info!("Skipping the `{stage}` stage");
                continue;
            }

            log::debug!("Starting the `{stage}` stage for {target:?}");
            let outcome = match stage {
                Stage::CreateDirectory => self.create_directory(request, target),
                Stage::InitManifest => self.init_manifest(target),
                Stage::CopyTemplates => self
                    .copy_templates(target)
                    .map(|copied| report.copied = copied),
                Stage::InstallDependencies => {
                    self.install(stage, target, &DEPENDENCIES, false)
                }
                Stage::InstallDevDependencies => {
                    self.install(stage, target, &DEV_DEPENDENCIES, true)
                }
            };
            outcome.with_context(|| format!("Aborting the project creation at the `{stage}` stage"))?;

            report.completed.push(stage);
        }

        Ok(report)
    }

    fn create_directory(&self, request: &ProjectRequest, target: &Path) -> Result<()> {
        utils::fs::check_project_root_available(target)?;
        utils::fs::create_directory(target)?;

        println!();
        println!("Welcome to {CREATE_PIKA_APP}");
        println!();
        println!("Creating app: {}\n", request.name);
        Ok(())
    }

    fn init_manifest(&self, target: &Path) -> Result<()> {
        let init = self.package_manager.init_command(target);
        self.execute(Stage::InitManifest, &init)?;

        ManifestPatch::default().apply_to_file(&target.join(MANIFEST_FILE_NAME))
    }

    fn copy_templates(&self, target: &Path) -> Result<CopyReport> {
        log::debug!("Copying the {}", self.template.describe());
        let copied = self.template.transfer_into(target, TransferMode::Copy)?;
        log::debug!(
            "Copied {} files and {} directories into {target:?}",
            copied.files,
            copied.directories
        );
        Ok(copied)
    }

    fn install(&self, stage: Stage, target: &Path, packages: &[&str], dev: bool) -> Result<()> {
        let summary = install_summary(dev);
        println!(" {CREATE_PIKA_APP} installing... {summary}");

        let install = self.package_manager.install_command(target, packages, dev);
        self.execute(stage, &install)?;

        println!("✔ {CREATE_PIKA_APP} installed {summary}");
        Ok(())
    }

    /// Runs `command` on behalf of `stage`, turning both a spawn failure and an
    /// unsuccessful termination into a [`ScaffoldError`]
    fn execute(&self, stage: Stage, command: &CommandLine) -> Result<CommandOutput> {
        let output = self
            .runner
            .run(command)
            .map_err(|source| ScaffoldError::SpawnFailed {
                stage,
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScaffoldError::StageFailed {
                stage,
                command: command.to_string(),
                status: output.status,
            }
            .into());
        }

        Ok(output)
    }
}

/// What the progress lines of an install name. The development tooling is too long a
/// list, so only its headline packages are shown
fn install_summary(dev: bool) -> String {
    if dev {
        format!("{}, and other dev dependencies", DEV_DEPENDENCIES_HEADLINE.join(", "))
    } else {
        progress_summary(&DEPENDENCIES_HEADLINE)
    }
}

/// `a, b, and c`
fn progress_summary(packages: &[&str]) -> String {
    match packages.split_last() {
        None => String::from("nothing"),
        Some((last, [])) => (*last).to_owned(),
        Some((last, rest)) => format!("{}, and {last}", rest.join(", ")),
    }
}
