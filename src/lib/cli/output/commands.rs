//! Contains the data structures that describe the external commands launched by
//! create-pika-app and the outcome of running them
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// How the standard output of a launched command is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The child writes straight to our own stdout
    Inherit,
    /// The child's stdout is discarded
    #[default]
    Silent,
    /// The child's stdout is collected into [`CommandOutput::stdout`]
    Capture,
}

/// A fully described invocation of an external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub output: OutputMode,
}

impl CommandLine {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            output: OutputMode::default(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }
}

impl Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// The termination status of a child process. `None` means it was killed by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus(pub Option<i32>);

impl CommandStatus {
    pub const SUCCESS: CommandStatus = CommandStatus(Some(0));

    pub fn success(&self) -> bool {
        self.0 == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        CommandStatus(status.code())
    }
}

impl Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "returned {code}"),
            None => write!(f, "was terminated by external signal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: CommandStatus,
    pub stdout: String,
}

impl CommandOutput {
    pub fn with_status(status: CommandStatus) -> Self {
        Self {
            status,
            stdout: String::new(),
        }
    }
}
