//! Dependency verification against the registry
//!
//! Classifies every declared dependency and drafts manifest fixes:
//! - unknown names are renamed to the suggested package
//! - missing versions are replaced by the closest published one

use crate::domain::{Dependency, ManifestFix, VerificationResult};
use crate::manifest::PackageJson;
use crate::progress::Progress;
use crate::registry::RegistryClient;
use crate::suggest::suggest_name;
use crate::version;
use tracing::{debug, info, warn};

/// Which fix kinds to draft
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixOptions {
    /// Rename unknown packages to their suggestion
    pub fix_name: bool,
    /// Rewrite missing versions to the closest available
    pub fix_version: bool,
}

impl FixOptions {
    /// Build options from the `verif` flags; `--fix-all` enables both
    pub fn from_flags(fix_all: bool, fix_name: bool, fix_version: bool) -> Self {
        Self {
            fix_name: fix_all || fix_name,
            fix_version: fix_all || fix_version,
        }
    }

    /// Returns true if any fix kind is enabled
    pub fn any(&self) -> bool {
        self.fix_name || self.fix_version
    }
}

/// A fixed copy of the manifest and the edits that produced it
#[derive(Debug, Clone)]
pub struct FixDraft {
    pub draft: PackageJson,
    pub fixes: Vec<ManifestFix>,
}

impl FixDraft {
    /// Returns true if at least one fix was computed
    pub fn has_fixes(&self) -> bool {
        !self.fixes.is_empty()
    }
}

/// Verifies declared dependencies one at a time
pub struct VerificationEngine<'a> {
    registry: &'a dyn RegistryClient,
}

impl<'a> VerificationEngine<'a> {
    pub fn new(registry: &'a dyn RegistryClient) -> Self {
        Self { registry }
    }

    /// One result per dependency, in input order
    pub async fn verify(&self, dependencies: &[Dependency]) -> Vec<VerificationResult> {
        self.verify_with_progress(dependencies, &Progress::disabled())
            .await
    }

    /// Same as [`verify`](Self::verify), reporting each lookup on `progress`
    pub async fn verify_with_progress(
        &self,
        dependencies: &[Dependency],
        progress: &Progress,
    ) -> Vec<VerificationResult> {
        let mut results = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            progress.checking(&dependency.name, dependency.declared_range());
            let result = self.verify_one(dependency).await;
            debug!(package = %dependency.name, status = result.status(), "verified");
            results.push(result);
        }

        info!(
            total = results.len(),
            ok = results.iter().filter(|r| r.is_ok()).count(),
            "verification finished"
        );
        results
    }

    async fn verify_one(&self, dependency: &Dependency) -> VerificationResult {
        let info = match self.registry.fetch_package_info(&dependency.name).await {
            Ok(Some(info)) => info,
            Ok(None) => {
                let suggestion = suggest_name(self.registry, &dependency.name).await;
                return VerificationResult::package_not_found(dependency.clone(), suggestion);
            }
            Err(e) => {
                warn!(package = %dependency.name, error = %e, "registry lookup failed");
                return VerificationResult::error(dependency.clone(), e.to_string());
            }
        };

        if info.has_version(&dependency.range.bare) {
            return VerificationResult::ok(dependency.clone());
        }

        match version::closest(&info.versions, dependency.declared_range()) {
            Ok(closest) => VerificationResult::version_not_found(
                dependency.clone(),
                format!("{}{}", dependency.range.prefix, closest),
            ),
            Err(e) => VerificationResult::error(dependency.clone(), e.to_string()),
        }
    }
}

/// Draft the fixes enabled by `options` onto a copy of `document`
///
/// `document` itself is untouched. Empty dependency maps are dropped from the draft.
pub fn compute_fixes(
    document: &PackageJson,
    results: &[VerificationResult],
    options: FixOptions,
) -> FixDraft {
    let mut draft = document.clone();
    let mut fixes = Vec::new();

    for result in results {
        match result {
            VerificationResult::PackageNotFound {
                dependency,
                suggestion: Some(suggestion),
            } if options.fix_name => {
                if draft.rename_dependency(dependency.dep_type, &dependency.name, suggestion) {
                    fixes.push(ManifestFix::Rename {
                        dep_type: dependency.dep_type,
                        from: dependency.name.clone(),
                        to: suggestion.clone(),
                    });
                }
            }
            VerificationResult::VersionNotFound {
                dependency,
                closest_version,
            } if options.fix_version => {
                draft.set_dependency(dependency.dep_type, &dependency.name, closest_version);
                fixes.push(ManifestFix::Version {
                    dep_type: dependency.dep_type,
                    name: dependency.name.clone(),
                    from: dependency.declared_range().to_string(),
                    to: closest_version.clone(),
                });
            }
            _ => {}
        }
    }

    draft.prune_empty_dependency_maps();
    FixDraft { draft, fixes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyType;
    use crate::testing::InMemoryRegistry;
    use std::path::Path;

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new()
            .with_versions("left-pad", &["1.0.0", "1.2.0", "1.3.0"])
            .with_versions("react", &["17.0.2", "18.2.0"])
            .with_versions("lodash", &["4.17.20", "4.17.21"])
            .with_versions("empty", &[])
            .with_search("reactt", &["react", "preact"])
            .with_failure("flaky", "connection reset")
    }

    fn manifest(content: &str) -> PackageJson {
        PackageJson::parse(Path::new("package.json"), content).unwrap()
    }

    #[test]
    fn test_fix_options_from_flags() {
        assert_eq!(
            FixOptions::from_flags(true, false, false),
            FixOptions {
                fix_name: true,
                fix_version: true
            }
        );
        assert!(FixOptions::from_flags(false, true, false).fix_name);
        assert!(!FixOptions::from_flags(false, true, false).fix_version);
        assert!(!FixOptions::default().any());
    }

    #[tokio::test]
    async fn test_verify_ok() {
        let registry = registry();
        let results = VerificationEngine::new(&registry)
            .verify(&[Dependency::production("lodash", "^4.17.21")])
            .await;
        assert_eq!(results, vec![VerificationResult::ok(Dependency::production("lodash", "^4.17.21"))]);
    }

    #[tokio::test]
    async fn test_verify_version_not_found_keeps_prefix() {
        let registry = registry();
        let dep = Dependency::production("left-pad", "^9.9.9");
        let results = VerificationEngine::new(&registry).verify(&[dep.clone()]).await;
        assert_eq!(results, vec![VerificationResult::version_not_found(dep, "^1.3.0")]);
    }

    #[tokio::test]
    async fn test_verify_package_not_found_with_suggestion() {
        let registry = registry();
        let dep = Dependency::production("reactt", "^18.0.0");
        let results = VerificationEngine::new(&registry).verify(&[dep.clone()]).await;
        assert_eq!(
            results,
            vec![VerificationResult::package_not_found(dep, Some("react".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_verify_package_not_found_without_suggestion() {
        let registry = registry();
        let dep = Dependency::production("zzz-none", "1.0.0");
        let results = VerificationEngine::new(&registry).verify(&[dep.clone()]).await;
        assert_eq!(results, vec![VerificationResult::package_not_found(dep, None)]);
    }

    #[tokio::test]
    async fn test_verify_error_does_not_abort_batch() {
        let registry = registry();
        let deps = [
            Dependency::production("flaky", "^1.0.0"),
            Dependency::production("empty", "^1.0.0"),
            Dependency::production("lodash", "4.17.20"),
        ];
        let results = VerificationEngine::new(&registry).verify(&deps).await;

        assert_eq!(results.len(), 3);
        assert!(matches!(&results[0], VerificationResult::Error { message, .. } if message.contains("connection reset")));
        assert!(matches!(&results[1], VerificationResult::Error { message, .. } if message == "no versions available"));
        assert!(results[2].is_ok());
    }

    #[tokio::test]
    async fn test_verify_is_idempotent() {
        let registry = registry();
        let engine = VerificationEngine::new(&registry);
        let deps = [
            Dependency::production("left-pad", "^9.9.9"),
            Dependency::development("reactt", "^18.0.0"),
        ];
        assert_eq!(engine.verify(&deps).await, engine.verify(&deps).await);
        assert_eq!(registry.fetch_count(), 4);
    }

    #[tokio::test]
    async fn test_compute_fixes_all() {
        let registry = registry();
        let document = manifest(
            r#"{"name": "demo", "dependencies": {"reactt": "^18.0.0", "left-pad": "^9.9.9"}, "devDependencies": {}}"#,
        );
        let results = VerificationEngine::new(&registry)
            .verify(&document.declared_dependencies())
            .await;

        let draft = compute_fixes(&document, &results, FixOptions::from_flags(true, false, false));
        assert_eq!(draft.fixes.len(), 2);
        assert_eq!(
            draft.draft.dependency_range(DependencyType::Production, "react"),
            Some("^18.0.0")
        );
        assert_eq!(
            draft.draft.dependency_range(DependencyType::Production, "left-pad"),
            Some("^1.3.0")
        );
        assert!(!draft.draft.as_map().contains_key("devDependencies"));

        // Original untouched
        assert_eq!(
            document.dependency_range(DependencyType::Production, "reactt"),
            Some("^18.0.0")
        );

        // Re-verifying the fixed draft reports nothing further
        let rerun = VerificationEngine::new(&registry)
            .verify(&draft.draft.declared_dependencies())
            .await;
        assert!(rerun.iter().all(|r| !matches!(r, VerificationResult::PackageNotFound { .. })));
        let left_pad = rerun.iter().find(|r| r.package_name() == "left-pad").unwrap();
        assert!(left_pad.is_ok());
    }

    #[tokio::test]
    async fn test_compute_fixes_version_only() {
        let registry = registry();
        let document = manifest(r#"{"dependencies": {"reactt": "^18.0.0", "left-pad": "~9.9.9"}}"#);
        let results = VerificationEngine::new(&registry)
            .verify(&document.declared_dependencies())
            .await;

        let draft = compute_fixes(&document, &results, FixOptions::from_flags(false, false, true));
        assert_eq!(
            draft.fixes,
            vec![ManifestFix::Version {
                dep_type: DependencyType::Production,
                name: "left-pad".to_string(),
                from: "~9.9.9".to_string(),
                to: "~1.3.0".to_string(),
            }]
        );
        assert_eq!(
            draft.draft.dependency_range(DependencyType::Production, "reactt"),
            Some("^18.0.0")
        );
    }

    #[tokio::test]
    async fn test_compute_fixes_none_enabled() {
        let registry = registry();
        let document = manifest(r#"{"dependencies": {"left-pad": "^9.9.9"}}"#);
        let results = VerificationEngine::new(&registry)
            .verify(&document.declared_dependencies())
            .await;
        let draft = compute_fixes(&document, &results, FixOptions::default());
        assert!(!draft.has_fixes());
    }
}
