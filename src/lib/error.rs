//! Typed failures of a scaffolding run.
//!
//! Stages return [`color_eyre::Result`], so these errors travel inside an
//! [`color_eyre::Report`] together with the context added along the way. They can be
//! recovered with [`color_eyre::Report::downcast_ref`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::output::commands::CommandStatus;
use crate::pipeline::Stage;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("No project name was provided")]
    MissingProjectName,

    #[error("Directory {path:?} already exists and is not empty")]
    TargetNotAvailable { path: PathBuf },

    #[error("Stage `{stage}` failed: `{command}` {status}")]
    StageFailed {
        stage: Stage,
        command: String,
        status: CommandStatus,
    },

    #[error("Stage `{stage}` could not run `{command}`")]
    SpawnFailed {
        stage: Stage,
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy the template entry {path:?}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid manifest {path:?}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },
}

impl ScaffoldError {
    /// The stage that produced this error, if it comes from a subprocess invocation
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ScaffoldError::StageFailed { stage, .. } | ScaffoldError::SpawnFailed { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}
