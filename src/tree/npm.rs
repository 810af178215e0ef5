//! Tree resolution through `npm ls`

use super::{DependencyNode, TreeResolver};
use crate::error::CommandError;
use crate::process::run_command;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded-depth listing
const PRIMARY_ARGS: &[&str] = &["ls", "--json", "--long", "--depth=10"];

/// Same listing including every transitive node
const FALLBACK_ARGS: &[&str] = &["ls", "--json", "--long", "--depth=10", "--all"];

/// Resolves the installed tree by running npm in the project directory
pub struct NpmTreeResolver {
    working_dir: PathBuf,
    timeout: Duration,
    program: String,
}

impl NpmTreeResolver {
    pub fn new(working_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout,
            program: "npm".to_string(),
        }
    }

    /// Use a different npm executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn list(&self, args: &[&str]) -> Result<DependencyNode, CommandError> {
        let output = run_command(&self.program, args, &self.working_dir, self.timeout)
            .await?
            .into_success()?;
        DependencyNode::from_json(&output.stdout).map_err(|e| CommandError::InvalidOutput {
            command: output.command,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TreeResolver for NpmTreeResolver {
    async fn dependency_tree(&self) -> Option<DependencyNode> {
        match self.list(PRIMARY_ARGS).await {
            Ok(tree) => return Some(tree),
            Err(e) => debug!(error = %e, "bounded npm ls failed, retrying with --all"),
        }
        match self.list(FALLBACK_ARGS).await {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!(error = %e, "dependency tree unavailable");
                None
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Write an executable script standing in for npm
    fn fake_npm(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("fake-npm");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_primary_strategy() {
        let dir = TempDir::new().unwrap();
        let npm = fake_npm(&dir, r#"echo '{"name":"app","dependencies":{"a":{"version":"1.0.0"}}}'"#);
        let resolver = NpmTreeResolver::new(dir.path(), Duration::from_secs(5)).with_program(npm);

        let tree = resolver.dependency_tree().await.unwrap();
        assert_eq!(tree.dependencies["a"].name.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_fallback_strategy() {
        let dir = TempDir::new().unwrap();
        let npm = fake_npm(
            &dir,
            r#"case "$*" in
  *--all*) echo '{"name":"app","version":"1.0.0"}' ;;
  *) echo 'npm ERR! missing peer' >&2; exit 1 ;;
esac"#,
        );
        let resolver = NpmTreeResolver::new(dir.path(), Duration::from_secs(5)).with_program(npm);

        let tree = resolver.dependency_tree().await.unwrap();
        assert_eq!(tree.version.as_deref(), Some("1.0.0"));
    }

    #[tokio::test]
    async fn test_both_strategies_fail() {
        let dir = TempDir::new().unwrap();
        let npm = fake_npm(&dir, "echo 'not json'");
        let resolver = NpmTreeResolver::new(dir.path(), Duration::from_secs(5)).with_program(npm);
        assert!(resolver.dependency_tree().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = TempDir::new().unwrap();
        let resolver = NpmTreeResolver::new(dir.path(), Duration::from_secs(5))
            .with_program("nph-no-such-npm");
        assert!(resolver.dependency_tree().await.is_none());
    }
}
