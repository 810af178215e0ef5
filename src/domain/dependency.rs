//! Dependency information structures

use super::{DependencyType, VersionRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency declared in package.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Declared range
    pub range: VersionRange,
    /// The map this dependency is declared in
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(name: impl Into<String>, range: impl Into<String>, dep_type: DependencyType) -> Self {
        Self {
            name: name.into(),
            range: VersionRange::parse(range),
            dep_type,
        }
    }

    /// Creates a new production dependency
    pub fn production(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(name, range, DependencyType::Production)
    }

    /// Creates a new development dependency
    pub fn development(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(name, range, DependencyType::Development)
    }

    /// Returns the declared range string
    pub fn declared_range(&self) -> &str {
        &self.range.raw
    }

    /// Returns true if this is a development dependency
    pub fn is_dev(&self) -> bool {
        self.dep_type.is_dev()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.range)
    }
}
