//! Verification outcome types

use super::{Dependency, DependencyType};
use serde::Serialize;
use std::fmt;

/// Classification of a single declared dependency against the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum VerificationResult {
    /// The declared version exists in the registry
    Ok { dependency: Dependency },
    /// The package exists but the declared version does not
    VersionNotFound {
        dependency: Dependency,
        /// Replacement range: original caret/tilde prefix + closest version
        closest_version: String,
    },
    /// The registry has no such package
    PackageNotFound {
        dependency: Dependency,
        /// Likely intended package name
        suggestion: Option<String>,
    },
    /// The lookup failed
    Error {
        dependency: Dependency,
        message: String,
    },
}

impl VerificationResult {
    /// Creates an Ok result
    pub fn ok(dependency: Dependency) -> Self {
        VerificationResult::Ok { dependency }
    }

    /// Creates a VersionNotFound result
    pub fn version_not_found(dependency: Dependency, closest_version: impl Into<String>) -> Self {
        VerificationResult::VersionNotFound {
            dependency,
            closest_version: closest_version.into(),
        }
    }

    /// Creates a PackageNotFound result
    pub fn package_not_found(dependency: Dependency, suggestion: Option<String>) -> Self {
        VerificationResult::PackageNotFound {
            dependency,
            suggestion,
        }
    }

    /// Creates an Error result
    pub fn error(dependency: Dependency, message: impl Into<String>) -> Self {
        VerificationResult::Error {
            dependency,
            message: message.into(),
        }
    }

    /// Returns the dependency reference
    pub fn dependency(&self) -> &Dependency {
        match self {
            VerificationResult::Ok { dependency }
            | VerificationResult::VersionNotFound { dependency, .. }
            | VerificationResult::PackageNotFound { dependency, .. }
            | VerificationResult::Error { dependency, .. } => dependency,
        }
    }

    /// Returns the package name
    pub fn package_name(&self) -> &str {
        &self.dependency().name
    }

    /// Returns the map the dependency was declared in
    pub fn dep_type(&self) -> DependencyType {
        self.dependency().dep_type
    }

    /// Returns true if the dependency verified cleanly
    pub fn is_ok(&self) -> bool {
        matches!(self, VerificationResult::Ok { .. })
    }

    /// Short status label
    pub fn status(&self) -> &'static str {
        match self {
            VerificationResult::Ok { .. } => "ok",
            VerificationResult::VersionNotFound { .. } => "version-not-found",
            VerificationResult::PackageNotFound { .. } => "package-not-found",
            VerificationResult::Error { .. } => "error",
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationResult::Ok { dependency } => write!(f, "{}: ok", dependency),
            VerificationResult::VersionNotFound {
                dependency,
                closest_version,
            } => write!(f, "{}: version not found (closest {})", dependency, closest_version),
            VerificationResult::PackageNotFound {
                dependency,
                suggestion: Some(suggestion),
            } => write!(f, "{}: package not found (did you mean {})", dependency, suggestion),
            VerificationResult::PackageNotFound { dependency, .. } => {
                write!(f, "{}: package not found", dependency)
            }
            VerificationResult::Error {
                dependency,
                message,
            } => write!(f, "{}: error ({})", dependency, message),
        }
    }
}

/// A manifest edit computed from verification results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ManifestFix {
    /// Rename a dependency key, keeping its declared range
    Rename {
        dep_type: DependencyType,
        from: String,
        to: String,
    },
    /// Replace a declared range
    Version {
        dep_type: DependencyType,
        name: String,
        from: String,
        to: String,
    },
}

impl fmt::Display for ManifestFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestFix::Rename { dep_type, from, to } => {
                write!(f, "{}: {} → {}", dep_type, from, to)
            }
            ManifestFix::Version {
                dep_type,
                name,
                from,
                to,
            } => write!(f, "{}: {}@{} → {}", dep_type, name, from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lodash() -> Dependency {
        Dependency::production("lodash", "^4.17.21")
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(VerificationResult::ok(lodash()).status(), "ok");
        assert_eq!(
            VerificationResult::version_not_found(lodash(), "^4.17.20").status(),
            "version-not-found"
        );
        assert_eq!(
            VerificationResult::package_not_found(lodash(), None).status(),
            "package-not-found"
        );
        assert_eq!(
            VerificationResult::error(lodash(), "boom").status(),
            "error"
        );
    }

    #[test]
    fn test_accessors() {
        let result = VerificationResult::error(Dependency::development("jest", "^29.0.0"), "x");
        assert_eq!(result.package_name(), "jest");
        assert_eq!(result.dep_type(), DependencyType::Development);
        assert!(!result.is_ok());
        assert!(VerificationResult::ok(lodash()).is_ok());
    }

    #[test]
    fn test_display() {
        let result = VerificationResult::package_not_found(
            Dependency::production("reactt", "^18.0.0"),
            Some("react".to_string()),
        );
        assert_eq!(
            result.to_string(),
            "reactt@^18.0.0: package not found (did you mean react)"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let result = VerificationResult::version_not_found(lodash(), "^4.17.20");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "version-not-found");
        assert_eq!(json["closest_version"], "^4.17.20");
        assert_eq!(json["dependency"]["name"], "lodash");
    }

    #[test]
    fn test_fix_display() {
        let fix = ManifestFix::Rename {
            dep_type: DependencyType::Production,
            from: "reactt".to_string(),
            to: "react".to_string(),
        };
        assert_eq!(fix.to_string(), "dependencies: reactt → react");
    }
}
