//! Deprecation scanning
//!
//! Two independent sources feed a `DeprecationReport`:
//! - registry deprecation notices for declared packages
//! - deprecated API uses found by a code scanner (ESLint)

mod eslint;

pub use eslint::EslintScanner;

use crate::domain::{DeprecatedPackage, DeprecatedPattern, DeprecationReport, Dependency};
use crate::error::CommandError;
use crate::progress::Progress;
use crate::registry::RegistryClient;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Source of deprecated code patterns
#[async_trait]
pub trait PatternScanner: Send + Sync {
    async fn scan(&self) -> Result<Vec<DeprecatedPattern>, CommandError>;
}

/// Builds deprecation reports
pub struct DeprecationScanner<'a> {
    registry: &'a dyn RegistryClient,
    patterns: &'a dyn PatternScanner,
}

impl<'a> DeprecationScanner<'a> {
    pub fn new(registry: &'a dyn RegistryClient, patterns: &'a dyn PatternScanner) -> Self {
        Self { registry, patterns }
    }

    /// Scan packages then code; failures are logged and contribute nothing
    pub async fn scan(&self, dependencies: &[Dependency], progress: &Progress) -> DeprecationReport {
        let mut report = DeprecationReport {
            deprecated_packages: self.deprecated_packages(dependencies, progress).await,
            ..Default::default()
        };

        progress.set_message("Scanning code for deprecated APIs...");
        match self.patterns.scan().await {
            Ok(patterns) => report.deprecated_code_patterns = patterns,
            Err(e) => warn!(error = %e, "code scan failed"),
        }

        info!(
            packages = report.deprecated_packages.len(),
            patterns = report.deprecated_code_patterns.len(),
            "deprecation scan finished"
        );
        report
    }

    async fn deprecated_packages(
        &self,
        dependencies: &[Dependency],
        progress: &Progress,
    ) -> Vec<DeprecatedPackage> {
        let mut found = Vec::new();
        for dependency in dependencies {
            progress.checking(&dependency.name, dependency.declared_range());
            match self.registry.fetch_package_info(&dependency.name).await {
                Ok(Some(info)) => {
                    if let Some(reason) = info.deprecated {
                        found.push(DeprecatedPackage {
                            package: dependency.name.clone(),
                            reason,
                        });
                    }
                }
                Ok(None) => warn!(package = %dependency.name, "package not found in registry"),
                Err(e) => error!(package = %dependency.name, error = %e, "failed to check package"),
            }
        }
        found
    }
}
