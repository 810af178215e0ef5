//! ESLint-based scan for deprecated API uses

use super::PatternScanner;
use crate::domain::DeprecatedPattern;
use crate::error::CommandError;
use crate::process::run_command;
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

const ESLINT_CONFIG: &str = ".eslintrc.json";
const DEPRECATION_RULE: &str = "deprecation/deprecation";
const ESLINT_ARGS: &[&str] = &["eslint", ".", "--format", "json"];

/// Exit status ESLint uses when lint errors were reported
const ESLINT_FOUND_PROBLEMS: i32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintFileResult {
    file_path: String,
    #[serde(default)]
    messages: Vec<EslintMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintMessage {
    #[serde(default)]
    rule_id: Option<String>,
    #[serde(default)]
    line: u64,
    #[serde(default)]
    column: u64,
    message: String,
}

/// Runs `npx eslint . --format json` in the project directory
pub struct EslintScanner {
    working_dir: PathBuf,
    timeout: Duration,
    program: String,
}

impl EslintScanner {
    pub fn new(working_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout,
            program: "npx".to_string(),
        }
    }

    /// Use a different npx executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Write a config enabling the deprecation rule unless one exists
    fn ensure_config(&self) -> Result<(), CommandError> {
        let path = self.working_dir.join(ESLINT_CONFIG);
        if path.exists() {
            return Ok(());
        }

        let config = serde_json::json!({
            "root": true,
            "parserOptions": {
                "ecmaVersion": 2022,
                "sourceType": "module"
            },
            "plugins": ["deprecation"],
            "rules": {
                DEPRECATION_RULE: "error"
            }
        });
        let content = serde_json::to_string_pretty(&config).unwrap_or_default() + "\n";
        fs::write(&path, content).map_err(|source| CommandError::Prepare {
            command: ESLINT_CONFIG.to_string(),
            source,
        })?;
        info!(path = %path.display(), "wrote lint configuration");
        Ok(())
    }
}

/// Deprecation findings from ESLint JSON output
fn parse_report(command: &str, stdout: &str) -> Result<Vec<DeprecatedPattern>, CommandError> {
    let files: Vec<EslintFileResult> =
        serde_json::from_str(stdout).map_err(|e| CommandError::InvalidOutput {
            command: command.to_string(),
            message: e.to_string(),
        })?;

    Ok(files
        .into_iter()
        .flat_map(|file| {
            let path = file.file_path;
            file.messages
                .into_iter()
                .filter(|m| m.rule_id.as_deref() == Some(DEPRECATION_RULE))
                .map(move |m| DeprecatedPattern {
                    file: path.clone(),
                    line: m.line,
                    column: m.column,
                    message: m.message,
                })
        })
        .collect())
}

#[async_trait]
impl PatternScanner for EslintScanner {
    async fn scan(&self) -> Result<Vec<DeprecatedPattern>, CommandError> {
        self.ensure_config()?;

        let output = run_command(&self.program, ESLINT_ARGS, &self.working_dir, self.timeout).await?;
        let found_problems = output.status.code() == Some(ESLINT_FOUND_PROBLEMS);
        if !output.success() && !found_problems {
            return Err(CommandError::Failed {
                command: output.command,
                status: output.status.to_string(),
            });
        }

        let patterns = parse_report(&output.command, &output.stdout)?;
        debug!(count = patterns.len(), "eslint deprecation findings");
        Ok(patterns)
    }
}
