//! Installed dependency graph
//!
//! This module provides:
//! - `DependencyNode`, the shape reported by `npm ls --json`
//! - The `TreeResolver` seam used by the upgrade engine
//! - The npm implementation with its fallback strategy

mod npm;

pub use npm::NpmTreeResolver;

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A resolved package in the installed tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Install location; npm reports it with `--long`
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyNode>,
}

impl DependencyNode {
    /// Creates a node with a name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            ..Default::default()
        }
    }

    /// Adds a peer requirement
    pub fn with_peer(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.peer_dependencies.insert(name.into(), range.into());
        self
    }

    /// Adds a child keyed by its name
    pub fn with_child(mut self, child: DependencyNode) -> Self {
        let key = child.display_name().to_string();
        self.dependencies.insert(key, child);
        self
    }

    /// Sets the install path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Parse `npm ls --json` output
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut root: DependencyNode = serde_json::from_str(json)?;
        root.normalize();
        Ok(root)
    }

    /// Fill missing child names from their map keys
    pub fn normalize(&mut self) {
        for (key, child) in self.dependencies.iter_mut() {
            if child.name.is_none() {
                child.name = Some(key.clone());
            }
            child.normalize();
        }
    }

    /// Name, or an empty string for an anonymous root
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Traversal identity: install path, else `name@version`
    pub fn identity(&self) -> String {
        match &self.path {
            Some(path) => path.clone(),
            None => format!(
                "{}@{}",
                self.display_name(),
                self.version.as_deref().unwrap_or("")
            ),
        }
    }
}

/// Source of the installed dependency tree
#[async_trait]
pub trait TreeResolver: Send + Sync {
    /// The installed tree, or `None` when it cannot be obtained
    async fn dependency_tree(&self) -> Option<DependencyNode>;
}

/// A resolver that always returns the same tree
pub struct StaticTreeResolver(pub Option<DependencyNode>);

#[async_trait]
impl TreeResolver for StaticTreeResolver {
    async fn dependency_tree(&self) -> Option<DependencyNode> {
        self.0.clone()
    }
}
