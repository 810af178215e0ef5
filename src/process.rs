//! External command execution
//!
//! Runs `npm` and `npx` with captured output and a hard timeout.

use crate::error::CommandError;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The command line that was executed
    pub command: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true if the process exited with status 0
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Turn a non-zero exit into `CommandError::Failed`
    pub fn into_success(self) -> Result<Self, CommandError> {
        if self.success() {
            Ok(self)
        } else {
            Err(CommandError::Failed {
                command: self.command,
                status: self.status.to_string(),
            })
        }
    }
}

/// Run `program args…` in `working_dir`, killing it after `timeout`
pub async fn run_command(
    program: &str,
    args: &[&str],
    working_dir: &Path,
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %command_line, dir = %working_dir.display(), "running command");

    let child = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CommandError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| CommandError::Spawn {
            command: command_line.clone(),
            source,
        })?,
        Err(_) => {
            return Err(CommandError::Timeout {
                command: command_line,
                timeout,
            })
        }
    };

    Ok(CommandOutput {
        command: command_line,
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
