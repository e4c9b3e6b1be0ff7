use std::fmt::Display;
use std::path::Path;

use clap::ValueEnum;

use crate::cli::output::commands::CommandLine;

/// [`PackageManager`] The Node package managers able to drive a generated project
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

impl PackageManager {
    /// The name of the executable behind this package manager
    pub fn binary(&self) -> &'static str {
        match *self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// The non interactive command that writes a default manifest on `project_dir`
    pub fn init_command(&self, project_dir: &Path) -> CommandLine {
        let cmd = CommandLine::new(self.binary())
            .arg("init")
            .current_dir(project_dir);
        match *self {
            PackageManager::Npm | PackageManager::Yarn => cmd.arg("--yes"),
            PackageManager::Pnpm => cmd,
        }
    }

    /// The command that installs `packages` on `project_dir`, either as runtime or as
    /// development dependencies
    pub fn install_command(&self, project_dir: &Path, packages: &[&str], dev: bool) -> CommandLine {
        let cmd = match *self {
            PackageManager::Npm => CommandLine::new("npm")
                .args(["install", "--silent"])
                .arg(if dev { "-D" } else { "--save" }),
            PackageManager::Yarn | PackageManager::Pnpm => {
                let cmd = CommandLine::new(self.binary()).args(["add", "--silent"]);
                if dev {
                    cmd.arg("-D")
                } else {
                    cmd
                }
            }
        };

        cmd.args(packages.iter().copied()).current_dir(project_dir)
    }
}
