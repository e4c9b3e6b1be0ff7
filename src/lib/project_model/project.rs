use std::path::{Path, PathBuf};

use crate::cli::input::CliArgs;
use crate::error::ScaffoldError;

use super::package_manager::PackageManager;

/// The user's request of a new project, built once from the CLI input and read-only
/// afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    pub name: String,
    pub is_absolute_path: bool,
    pub verbose: bool,
    pub show_info: bool,
}

impl ProjectRequest {
    pub fn new<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        let is_absolute_path = Path::new(&name).is_absolute();
        Self {
            name,
            is_absolute_path,
            verbose: false,
            show_info: false,
        }
    }

    pub fn from_cli(cli_args: &CliArgs) -> Result<Self, ScaffoldError> {
        let name = cli_args
            .project_directory
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(ScaffoldError::MissingProjectName)?;

        Ok(Self {
            verbose: cli_args.verbose > 0,
            show_info: cli_args.info,
            ..Self::new(name)
        })
    }

    /// Where the project lives: exactly [`ProjectRequest::name`] when it's an absolute
    /// path, or a directory with that name under `cwd` otherwise
    pub fn target_dir(&self, cwd: &Path) -> PathBuf {
        if self.is_absolute_path {
            PathBuf::from(&self.name)
        } else {
            cwd.join(&self.name)
        }
    }
}

/// The settings of a run that aren't part of the [`ProjectRequest`] itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub package_manager: PackageManager,
    pub template: Option<PathBuf>,
    pub skip_install: bool,
}

impl From<&CliArgs> for ScaffoldOptions {
    fn from(cli_args: &CliArgs) -> Self {
        Self {
            package_manager: cli_args.package_manager,
            template: cli_args.template.clone(),
            skip_install: cli_args.skip_install,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_relative_name_resolves_under_cwd() {
        let request = ProjectRequest::new("my-app");
        assert!(!request.is_absolute_path);
        assert_eq!(
            request.target_dir(Path::new("/home/u")),
            PathBuf::from("/home/u/my-app")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_name_ignores_cwd() {
        let request = ProjectRequest::new("/abs/path/app");
        assert!(request.is_absolute_path);
        assert_eq!(
            request.target_dir(Path::new("/home/u")),
            PathBuf::from("/abs/path/app")
        );
    }

    #[test]
    fn test_request_from_cli() {
        let cli = CliArgs::parse_from(["", "app", "--verbose"]);
        let request = ProjectRequest::from_cli(&cli).unwrap();
        assert_eq!(request.name, "app");
        assert!(request.verbose);
        assert!(!request.show_info);

        let cli = CliArgs::parse_from([""]);
        assert!(matches!(
            ProjectRequest::from_cli(&cli),
            Err(ScaffoldError::MissingProjectName)
        ));
    }
}
