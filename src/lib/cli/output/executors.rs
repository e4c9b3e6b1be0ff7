//! Launches the external processes (the package manager, version probes...) needed
//! along a run

use std::io;
use std::process::{Command, Stdio};

use super::commands::{CommandLine, CommandOutput, CommandStatus, OutputMode};

/// The capability of running an external [`CommandLine`] to completion.
///
/// A spawn failure is reported as an [`io::Error`]. A process that runs but fails is
/// *not* an error at this level: callers inspect [`CommandOutput::status`]
pub trait CommandRunner {
    fn run(&self, command: &CommandLine) -> io::Result<CommandOutput>;
}

/// Runs the commands as real child processes of this one, blocking until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> io::Result<CommandOutput> {
        log::debug!("Executing command => {:?}", command.to_string());

        // Resolving through PATH (and PATHEXT) lets `npm` find `npm.cmd` on Windows
        let program = which::which(&command.program)
            .map(|path| path.into_os_string())
            .unwrap_or_else(|_| command.program.clone().into());

        let mut process = Command::new(program);
        process.args(&command.args).stdin(Stdio::null());
        if let Some(dir) = &command.working_dir {
            process.current_dir(dir);
        }

        let output = match command.output {
            OutputMode::Inherit => {
                CommandOutput::with_status(process.stdout(Stdio::inherit()).status()?.into())
            }
            OutputMode::Silent => {
                CommandOutput::with_status(process.stdout(Stdio::null()).status()?.into())
            }
            OutputMode::Capture => {
                let out = process.stderr(Stdio::null()).output()?;
                CommandOutput {
                    status: CommandStatus::from(out.status),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                }
            }
        };

        log::debug!("Result of {:?}: {:?}", command.program, output.status);
        Ok(output)
    }
}
