//! Registry access for package metadata
//!
//! This module provides:
//! - The `RegistryClient` seam used by every engine
//! - HTTP client shared foundation (timeout, User-Agent, no retries)
//! - npm registry implementation (metadata and search)

mod client;
mod npm;

pub use client::HttpClient;
pub use npm::NpmRegistry;

use crate::error::RegistryError;
use crate::version;
use async_trait::async_trait;
use serde::Serialize;

/// Maximum number of names returned by a similarity search
pub const MAX_SUGGESTIONS: usize = 3;

/// Registry metadata for one package
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PackageInfo {
    pub name: String,
    /// Published versions, ascending; unparseable entries last
    pub versions: Vec<String>,
    /// Deprecation notice, if the registry reports one
    pub deprecated: Option<String>,
}

impl PackageInfo {
    /// Creates package info with the given versions, sorted ascending
    pub fn new<I, S>(name: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut versions: Vec<String> = versions.into_iter().map(Into::into).collect();
        sort_versions(&mut versions);
        Self {
            name: name.into(),
            versions,
            deprecated: None,
        }
    }

    /// Marks the package deprecated
    pub fn with_deprecated(mut self, notice: impl Into<String>) -> Self {
        self.deprecated = Some(notice.into());
        self
    }

    /// Returns true if `version` is a published version key
    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }
}

/// Sort ascending by semver precedence; unparseable versions keep their order at the end
pub(crate) fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| {
        match (version::parse(a).ok(), version::parse(b).ok()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

/// Package metadata source
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Fetch metadata for a package; `Ok(None)` when the registry does not know it
    async fn fetch_package_info(&self, name: &str) -> Result<Option<PackageInfo>, RegistryError>;

    /// Up to three names similar to `name`, most relevant first; empty on failure
    async fn find_similar_packages(&self, name: &str) -> Vec<String>;
}
