//! Command implementations
//!
//! Each command loads the manifest once, reports through a `TextFormatter`
//! and rewrites the manifest at most once. Interactive input always goes
//! through a [`Prompt`](crate::prompt::Prompt).

pub mod dep;
pub mod script;
pub mod upgrade;
pub mod verif;

use crate::config::Config;
use crate::output::TextFormatter;
use crate::progress::Progress;
use std::process::ExitCode;

/// How a command finished when it did not fail with an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The command reported a problem to the user and should exit nonzero
    Failure,
}

impl CommandStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Settings every command shares
#[derive(Debug, Clone)]
pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub text: TextFormatter,
    pub color: bool,
    /// Show spinners while working (off for tests and JSON output)
    pub show_progress: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(config: &'a Config, color: bool, show_progress: bool) -> Self {
        Self {
            config,
            text: TextFormatter::new(color),
            color,
            show_progress,
        }
    }

    /// Plain output without spinners
    pub fn plain(config: &'a Config) -> Self {
        Self::new(config, false, false)
    }

    fn progress(&self, message: &str) -> Progress {
        Progress::start(self.show_progress, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_status_exit_code() {
        assert_eq!(CommandStatus::Success.exit_code(), ExitCode::SUCCESS);
        assert_eq!(CommandStatus::Failure.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn test_plain_context() {
        let config = Config::new("/tmp/project");
        let ctx = CommandContext::plain(&config);
        assert!(!ctx.show_progress);
        assert_eq!(ctx.config.manifest_path, config.manifest_path);
    }
}
