pub mod resources;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use color_eyre::{eyre::Context, Result};
use walkdir::WalkDir;

use crate::error::ScaffoldError;
use crate::utils::constants::{dir_names, error_messages};

/// What happens with the files of an on-disk template when they're transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    #[default]
    Copy,
    /// The files are renamed into the destination, leaving the template's directories
    /// behind
    Move,
}

/// How much of the template ended up in the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyReport {
    pub directories: usize,
    pub files: usize,
}

/// A provider of the starter tree that every new project receives
pub trait TemplateSource: Debug {
    /// Human readable origin of the template, for logging purposes
    fn describe(&self) -> String;

    /// Reproduces the whole template tree under `destination`, creating the
    /// subdirectories on demand. Files already present are overwritten
    fn transfer_into(&self, destination: &Path, mode: TransferMode) -> Result<CopyReport>;
}

/// A template tree living on the file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTemplate {
    root: PathBuf,
}

impl DirectoryTemplate {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplate {
    fn describe(&self) -> String {
        format!("template directory {:?}", self.root)
    }

    fn transfer_into(&self, destination: &Path, mode: TransferMode) -> Result<CopyReport> {
        if !self.root.is_dir() {
            return Err(ScaffoldError::CopyFailed {
                path: self.root.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            }
            .into());
        }

        // Collected upfront, so moving files doesn't interfere with the walk
        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .collect::<Result<Vec<_>, walkdir::Error>>()
            .map_err(|err| ScaffoldError::CopyFailed {
                path: err.path().unwrap_or(self.root.as_path()).to_path_buf(),
                source: err.into(),
            })?;

        let mut report = CopyReport::default();
        for entry in entries {
            let source_path = entry.path();
            let relative = source_path
                .strip_prefix(&self.root)
                .with_context(|| format!("{source_path:?} escapes the template root"))?;
            let target_path = destination.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target_path).map_err(|source| ScaffoldError::CopyFailed {
                    path: target_path.clone(),
                    source,
                })?;
                report.directories += 1;
            } else {
                let transferred = match mode {
                    TransferMode::Copy => fs::copy(source_path, &target_path).map(|_| ()),
                    TransferMode::Move => fs::rename(source_path, &target_path),
                };
                transferred.map_err(|source| ScaffoldError::CopyFailed {
                    path: source_path.to_path_buf(),
                    source,
                })?;
                report.files += 1;
            }
            log::trace!("{mode:?} {source_path:?} => {target_path:?}");
        }

        Ok(report)
    }
}

/// The template compiled into the binary, see [`resources::FILES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedTemplate {
    files: &'static [(&'static str, &'static str)],
}

impl Default for EmbeddedTemplate {
    fn default() -> Self {
        Self {
            files: &resources::FILES,
        }
    }
}

impl EmbeddedTemplate {
    pub fn files(&self) -> &'static [(&'static str, &'static str)] {
        self.files
    }
}

impl TemplateSource for EmbeddedTemplate {
    fn describe(&self) -> String {
        String::from("bundled template")
    }

    fn transfer_into(&self, destination: &Path, mode: TransferMode) -> Result<CopyReport> {
        if mode == TransferMode::Move {
            log::debug!("The bundled template can't be moved. Copying it instead");
        }

        // Every ancestor directory of every file, parents sorted before their children
        let directories: BTreeSet<&Path> = self
            .files
            .iter()
            .flat_map(|(relative, _)| Path::new(relative).ancestors().skip(1))
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect();

        for dir in &directories {
            let target_path = destination.join(dir);
            fs::create_dir_all(&target_path)
                .map_err(|source| ScaffoldError::CopyFailed {
                    path: target_path,
                    source,
                })?;
        }

        for (relative, contents) in self.files {
            let target_path = destination.join(relative);
            fs::write(&target_path, contents).map_err(|source| ScaffoldError::CopyFailed {
                path: target_path,
                source,
            })?;
        }

        Ok(CopyReport {
            directories: directories.len(),
            files: self.files.len(),
        })
    }
}

/// Chooses where the project template comes from: the `explicit` directory if given,
/// then an `assets/templates` directory next to the running executable and, as the
/// last resort, the [`EmbeddedTemplate`]
pub fn resolve_template_source(explicit: Option<&Path>) -> Result<Box<dyn TemplateSource>> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(ScaffoldError::CopyFailed {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "template directory not found"),
            })
            .with_context(|| error_messages::FAILURE_RESOLVING_TEMPLATE);
        }
        return Ok(Box::new(DirectoryTemplate::new(dir)));
    }

    match installed_template_dir() {
        Some(dir) => Ok(Box::new(DirectoryTemplate::new(dir))),
        None => Ok(Box::new(EmbeddedTemplate::default())),
    }
}

/// The `assets/templates` directory shipped alongside the executable, if any
fn installed_template_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    let dir = exe
        .parent()?
        .join(dir_names::ASSETS)
        .join(dir_names::TEMPLATES);

    dir.is_dir().then_some(dir)
}
