//! Runtime configuration
//!
//! Built once in `main` and passed to every command.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Manifest file name looked up in the project directory
pub const MANIFEST_FILENAME: &str = "package.json";

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Environment variable overriding the registry base URL
pub const REGISTRY_ENV: &str = "NPH_REGISTRY";

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "NPH_LOG";

const LOG_DIR: &str = "logs";
const LOG_FILENAME: &str = "nph.log";

/// Per-request registry timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for `npm ls` and lint runs
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by all commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory commands operate in
    pub project_dir: PathBuf,
    /// Path to package.json
    pub manifest_path: PathBuf,
    /// Path to the log file
    pub log_path: PathBuf,
    /// Registry base URL without trailing slash
    pub registry_url: String,
    pub request_timeout: Duration,
    pub scan_timeout: Duration,
}

impl Config {
    /// Default configuration rooted at `project_dir`
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            manifest_path: project_dir.join(MANIFEST_FILENAME),
            log_path: project_dir.join(LOG_DIR).join(LOG_FILENAME),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            scan_timeout: SCAN_TIMEOUT,
            project_dir,
        }
    }

    /// Configuration for `project_dir` with environment overrides applied
    pub fn from_env(project_dir: impl Into<PathBuf>) -> Self {
        let config = Self::new(project_dir);
        match std::env::var(REGISTRY_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_registry_url(url),
            _ => config,
        }
    }

    /// Override the registry base URL
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Override the registry request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Directory holding the manifest
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}
