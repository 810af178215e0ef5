//! Dependency map kinds found in package.json

use serde::{Deserialize, Serialize};
use std::fmt;

/// The manifest map a dependency is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    /// `dependencies`
    #[serde(rename = "dependencies")]
    Production,
    /// `devDependencies`
    #[serde(rename = "devDependencies")]
    Development,
}

impl DependencyType {
    /// Returns the manifest key holding this dependency map
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyType::Production => "dependencies",
            DependencyType::Development => "devDependencies",
        }
    }

    /// Returns all dependency types in manifest order
    pub fn all() -> &'static [DependencyType] {
        &[DependencyType::Production, DependencyType::Development]
    }

    /// Returns true for `devDependencies`
    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyType::Development)
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manifest_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_key() {
        assert_eq!(DependencyType::Production.manifest_key(), "dependencies");
        assert_eq!(DependencyType::Development.manifest_key(), "devDependencies");
    }

    #[test]
    fn test_all_in_manifest_order() {
        assert_eq!(
            DependencyType::all(),
            &[DependencyType::Production, DependencyType::Development]
        );
    }

    #[test]
    fn test_serde_uses_manifest_keys() {
        let json = serde_json::to_string(&DependencyType::Development).unwrap();
        assert_eq!(json, "\"devDependencies\"");

        let parsed: DependencyType = serde_json::from_str("\"dependencies\"").unwrap();
        assert_eq!(parsed, DependencyType::Production);
    }
}
