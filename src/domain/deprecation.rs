//! Deprecation report types

use serde::{Deserialize, Serialize};

/// A package the registry marks deprecated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedPackage {
    pub package: String,
    pub reason: String,
}

/// A deprecated API use reported by the linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedPattern {
    pub file: String,
    pub line: u64,
    pub column: u64,
    pub message: String,
}

/// Everything the `dep` command found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationReport {
    pub deprecated_packages: Vec<DeprecatedPackage>,
    /// Always empty; kept for report shape compatibility
    pub deprecated_node_apis: Vec<DeprecatedPattern>,
    pub deprecated_code_patterns: Vec<DeprecatedPattern>,
}

impl DeprecationReport {
    /// Returns true if nothing deprecated was found
    pub fn is_empty(&self) -> bool {
        self.deprecated_packages.is_empty()
            && self.deprecated_node_apis.is_empty()
            && self.deprecated_code_patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        assert!(DeprecationReport::default().is_empty());
    }

    #[test]
    fn test_serialize_camel_case() {
        let report = DeprecationReport {
            deprecated_packages: vec![DeprecatedPackage {
                package: "request".to_string(),
                reason: "request has been deprecated".to_string(),
            }],
            ..Default::default()
        };
        assert!(!report.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["deprecatedPackages"][0]["package"], "request");
        assert!(json["deprecatedNodeApis"].as_array().unwrap().is_empty());
        assert!(json["deprecatedCodePatterns"].as_array().unwrap().is_empty());
    }
}
