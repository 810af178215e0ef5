//! npm registry client
//!
//! Metadata: `{base}/{package}` (scoped names keep `@`, `/` is encoded).
//! Search: `{base}/-/v1/search?text={query}&size=3`.

use super::{HttpClient, PackageInfo, RegistryClient, MAX_SUGGESTIONS};
use crate::config::Config;
use crate::error::RegistryError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// npm package document (the fields nph reads)
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    versions: HashMap<String, NpmVersionResponse>,
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    #[serde(default)]
    deprecated: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct NpmVersionResponse {
    #[serde(default)]
    deprecated: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NpmSearchResponse {
    #[serde(default)]
    objects: Vec<NpmSearchObject>,
}

#[derive(Debug, Deserialize)]
struct NpmSearchObject {
    package: NpmSearchPackage,
}

#[derive(Debug, Deserialize)]
struct NpmSearchPackage {
    name: String,
}

/// npm registry implementation of `RegistryClient`
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

impl NpmRegistry {
    /// Create a client for the registry at `base_url`
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the runtime configuration
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let client = HttpClient::with_timeout(config.request_timeout)?;
        Ok(Self::new(client, config.registry_url.clone()))
    }

    /// Build the metadata URL for a package
    fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, encode_package_name(package))
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/-/v1/search?text={}&size={}",
            self.base_url,
            urlencoding::encode(query),
            MAX_SUGGESTIONS
        )
    }
}

/// Encode a package name for the metadata path; scoped names keep the leading `@`
fn encode_package_name(package: &str) -> String {
    match package.strip_prefix('@') {
        Some(scoped) => format!("@{}", urlencoding::encode(scoped)),
        None => urlencoding::encode(package).into_owned(),
    }
}

/// A deprecation value is a message string; `false` or empty means not deprecated
fn deprecation_notice(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("deprecated".to_string()),
        _ => None,
    }
}

impl NpmPackageResponse {
    fn into_package_info(self, requested: &str) -> PackageInfo {
        let latest = self.dist_tags.get("latest").cloned();
        let deprecated = deprecation_notice(self.deprecated.as_ref()).or_else(|| {
            latest
                .as_ref()
                .and_then(|l| self.versions.get(l))
                .and_then(|v| deprecation_notice(v.deprecated.as_ref()))
        });

        let mut info = PackageInfo::new(
            self.name.unwrap_or_else(|| requested.to_string()),
            self.versions.into_keys(),
        );
        info.deprecated = deprecated;
        info
    }
}

#[async_trait]
impl RegistryClient for NpmRegistry {
    async fn fetch_package_info(&self, name: &str) -> Result<Option<PackageInfo>, RegistryError> {
        let url = self.package_url(name);
        let response: Option<NpmPackageResponse> = self.client.get_json(&url, name).await?;
        match response {
            Some(response) => {
                let info = response.into_package_info(name);
                debug!(package = name, versions = info.versions.len(), "fetched package info");
                Ok(Some(info))
            }
            None => {
                debug!(package = name, "package not found in registry");
                Ok(None)
            }
        }
    }

    async fn find_similar_packages(&self, name: &str) -> Vec<String> {
        let url = self.search_url(name);
        match self.client.get_json::<NpmSearchResponse>(&url, name).await {
            Ok(Some(response)) => response
                .objects
                .into_iter()
                .map(|object| object.package.name)
                .take(MAX_SUGGESTIONS)
                .collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(package = name, error = %e, "package search failed");
                Vec::new()
            }
        }
    }
}
