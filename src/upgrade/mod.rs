//! Upgrade resolution for declared dependencies
//!
//! This module provides:
//! - Latest-compatible version resolution per declared range
//! - Peer requirement checks against the installed tree
//! - Plan application onto a manifest document

mod peer;

pub use peer::find_peer_conflicts;

use crate::domain::{Dependency, SkipReason, SkippedUpgrade, UpgradeCandidate, UpgradePlan};
use crate::manifest::PackageJson;
use crate::progress::Progress;
use crate::registry::RegistryClient;
use crate::tree::DependencyNode;
use crate::version;
use tracing::{debug, info, warn};

/// Flags controlling which upgrades are proposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeOptions {
    /// Keep candidates that break peer requirements
    pub force: bool,
    /// Consider packages the registry marks deprecated
    pub ignore_deprecated: bool,
}

/// Outcome of evaluating one dependency
enum Decision {
    Upgrade(UpgradeCandidate),
    Skip(SkippedUpgrade),
    UpToDate,
}

/// Computes upgrade plans; never touches the manifest file
pub struct UpgradeEngine<'a> {
    registry: &'a dyn RegistryClient,
    options: UpgradeOptions,
}

impl<'a> UpgradeEngine<'a> {
    pub fn new(registry: &'a dyn RegistryClient, options: UpgradeOptions) -> Self {
        Self { registry, options }
    }

    /// Plan upgrades for `dependencies`; `tree` of `None` disables peer checks
    pub async fn plan(
        &self,
        dependencies: &[Dependency],
        tree: Option<&DependencyNode>,
    ) -> UpgradePlan {
        self.plan_with_progress(dependencies, tree, &Progress::disabled())
            .await
    }

    /// Same as [`plan`](Self::plan), reporting each lookup on `progress`
    pub async fn plan_with_progress(
        &self,
        dependencies: &[Dependency],
        tree: Option<&DependencyNode>,
        progress: &Progress,
    ) -> UpgradePlan {
        let mut plan = UpgradePlan {
            tree_available: tree.is_some(),
            ..Default::default()
        };

        for dependency in dependencies {
            progress.checking(&dependency.name, dependency.declared_range());
            match self.evaluate(dependency, tree).await {
                Decision::Upgrade(candidate) => {
                    debug!(package = %candidate.name, from = %candidate.from, to = %candidate.to, "upgrade available");
                    plan.upgrades.push(candidate);
                }
                Decision::Skip(skipped) => {
                    debug!(package = %skipped.dependency.name, reason = %skipped.reason, "upgrade skipped");
                    plan.skipped.push(skipped);
                }
                Decision::UpToDate => {}
            }
        }

        info!(
            upgrades = plan.upgrades.len(),
            skipped = plan.skipped.len(),
            tree_available = plan.tree_available,
            "upgrade plan computed"
        );
        plan
    }

    async fn evaluate(&self, dependency: &Dependency, tree: Option<&DependencyNode>) -> Decision {
        let skip = |reason| Decision::Skip(SkippedUpgrade::new(dependency.clone(), reason));

        let info = match self.registry.fetch_package_info(&dependency.name).await {
            Ok(Some(info)) => info,
            Ok(None) => return skip(SkipReason::NotFound),
            Err(e) => {
                warn!(package = %dependency.name, error = %e, "registry lookup failed");
                return skip(SkipReason::RegistryError(e.to_string()));
            }
        };

        if let Some(notice) = &info.deprecated {
            if !self.options.ignore_deprecated {
                return skip(SkipReason::Deprecated(notice.clone()));
            }
        }

        let Some(latest) = version::max_satisfying(&info.versions, dependency.declared_range())
        else {
            return skip(SkipReason::NotFound);
        };

        let current = match version::parse(&dependency.range.bare) {
            Ok(current) => current,
            Err(_) => return skip(SkipReason::InvalidVersion(dependency.range.bare.clone())),
        };
        match version::parse(&latest) {
            Ok(latest) if latest >= current => {}
            _ => return Decision::UpToDate,
        }

        let to = dependency.range.format_updated(&latest);
        if to == dependency.declared_range() {
            return Decision::UpToDate;
        }

        let conflicts = tree
            .map(|tree| find_peer_conflicts(tree, &dependency.name, &latest))
            .unwrap_or_default();
        if !conflicts.is_empty() && !self.options.force {
            return Decision::Skip(SkippedUpgrade::peer_conflicts(dependency.clone(), conflicts));
        }

        Decision::Upgrade(UpgradeCandidate {
            name: dependency.name.clone(),
            from: dependency.declared_range().to_string(),
            to,
            dep_type: dependency.dep_type,
            warnings: conflicts,
        })
    }
}

/// Rewrite every planned range in `document`
pub fn apply_upgrades(document: &mut PackageJson, plan: &UpgradePlan) {
    for candidate in &plan.upgrades {
        document.set_dependency(candidate.dep_type, &candidate.name, &candidate.to);
    }
}
