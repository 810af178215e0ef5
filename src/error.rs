//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: package.json missing, unparsable or not writable
//! - RegistryError: registry communication failures (404 is not an error)
//! - VersionError: version/range parsing and nearest-match failures
//! - CommandError: external process (npm, npx) failures
//! - PromptError: interactive input failures and cancellation

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Version comparison errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// External command errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Interactive prompt errors
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Terminal output errors
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Returns true if the user interrupted an interactive prompt
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Prompt(PromptError::Cancelled))
    }
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("no package.json found at {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Document parsed but is not a JSON object
    #[error("invalid manifest {path}: {message}")]
    InvalidDocument { path: PathBuf, message: String },
}

/// Errors related to package registry communication
///
/// A missing package is not an error: registry lookups return `Ok(None)` for 404.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed
    #[error("failed to fetch package '{package}': {message}")]
    NetworkError { package: String, message: String },

    /// Registry answered with a non-success status other than 404
    #[error("HTTP {status} while fetching package '{package}'")]
    HttpStatus { package: String, status: u16 },

    /// Invalid response from registry
    #[error("invalid response for '{package}': {message}")]
    InvalidResponse { package: String, message: String },

    /// Timeout
    #[error("timeout while fetching '{package}'")]
    Timeout { package: String },
}

/// Errors related to version parsing and matching
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Version string is not valid semver
    #[error("invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// Range string is not a valid npm range
    #[error("invalid range '{range}': {message}")]
    InvalidRange { range: String, message: String },

    /// Nearest-match search over an empty version set
    #[error("no versions available")]
    NoVersionsAvailable,
}

/// Errors related to running external commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// Failed to start the process
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process did not finish in time
    #[error("'{command}' timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    /// Process exited with a failure status
    #[error("'{command}' exited with status {status}")]
    Failed { command: String, status: String },

    /// Process output could not be parsed
    #[error("invalid output from '{command}': {message}")]
    InvalidOutput { command: String, message: String },

    /// A file the command needs could not be written
    #[error("failed to prepare '{command}': {source}")]
    Prepare {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to interactive prompts
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user interrupted the prompt
    #[error("operation cancelled")]
    Cancelled,

    /// Terminal IO failure
    #[error("prompt failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
        }
    }
}
