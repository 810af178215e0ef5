//! Upgrade decision types

use super::{Dependency, DependencyType};
use serde::Serialize;
use std::fmt;

/// A peer requirement that a proposed version would break
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerConflict {
    /// The installed package declaring the peer requirement
    pub package: String,
    /// The range it requires
    pub required: String,
    /// The version that would be installed
    pub actual: String,
}

impl fmt::Display for PeerConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires {} (would be {})",
            self.package, self.required, self.actual
        )
    }
}

/// Reason why a dependency was left out of the upgrade plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No registry entry or no version satisfying the declared range
    NotFound,
    /// The new version breaks at least one peer requirement
    PeerConflicts,
    /// The registry marks the package deprecated
    Deprecated(String),
    /// The declared version cannot be parsed
    InvalidVersion(String),
    /// The registry lookup failed
    RegistryError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "package not found in registry"),
            SkipReason::PeerConflicts => write!(f, "peer dependency conflicts"),
            SkipReason::Deprecated(_) => write!(f, "package deprecated"),
            SkipReason::InvalidVersion(_) => write!(f, "invalid declared version"),
            SkipReason::RegistryError(msg) => write!(f, "registry error: {}", msg),
        }
    }
}

/// A proposed range rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeCandidate {
    pub name: String,
    /// Current declared range
    pub from: String,
    /// Proposed range (prefix preserved)
    pub to: String,
    pub dep_type: DependencyType,
    /// Peer conflicts accepted through `--force`
    pub warnings: Vec<PeerConflict>,
}

impl fmt::Display for UpgradeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} → {}", self.name, self.from, self.to)
    }
}

/// A dependency left untouched, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUpgrade {
    pub dependency: Dependency,
    pub reason: SkipReason,
    pub conflicts: Vec<PeerConflict>,
}

impl SkippedUpgrade {
    /// Creates a skip without conflicts
    pub fn new(dependency: Dependency, reason: SkipReason) -> Self {
        Self {
            dependency,
            reason,
            conflicts: Vec::new(),
        }
    }

    /// Creates a peer-conflict skip
    pub fn peer_conflicts(dependency: Dependency, conflicts: Vec<PeerConflict>) -> Self {
        Self {
            dependency,
            reason: SkipReason::PeerConflicts,
            conflicts,
        }
    }
}

impl fmt::Display for SkippedUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: skipped ({})", self.dependency.name, self.reason)
    }
}

/// Upgrades and skips computed for one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpgradePlan {
    pub upgrades: Vec<UpgradeCandidate>,
    pub skipped: Vec<SkippedUpgrade>,
    /// False when no dependency tree was available and peer checks were not run
    pub tree_available: bool,
}

impl UpgradePlan {
    /// Returns true if there is nothing to apply
    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NotFound.to_string(), "package not found in registry");
        assert_eq!(SkipReason::PeerConflicts.to_string(), "peer dependency conflicts");
        assert_eq!(
            SkipReason::Deprecated("use y".to_string()).to_string(),
            "package deprecated"
        );
        assert_eq!(
            SkipReason::InvalidVersion("latest".to_string()).to_string(),
            "invalid declared version"
        );
        assert_eq!(
            SkipReason::RegistryError("HTTP 500".to_string()).to_string(),
            "registry error: HTTP 500"
        );
    }

    #[test]
    fn test_candidate_display() {
        let candidate = UpgradeCandidate {
            name: "lodash".to_string(),
            from: "^4.17.0".to_string(),
            to: "^4.17.21".to_string(),
            dep_type: DependencyType::Production,
            warnings: Vec::new(),
        };
        assert_eq!(candidate.to_string(), "lodash: ^4.17.0 → ^4.17.21");
    }

    #[test]
    fn test_skipped_peer_conflicts() {
        let conflict = PeerConflict {
            package: "plugin".to_string(),
            required: "^3.0.0".to_string(),
            actual: "4.0.0".to_string(),
        };
        let skipped =
            SkippedUpgrade::peer_conflicts(Dependency::production("x", "^3.0.0"), vec![conflict.clone()]);
        assert_eq!(skipped.reason, SkipReason::PeerConflicts);
        assert_eq!(skipped.conflicts, vec![conflict]);
        assert_eq!(skipped.to_string(), "x: skipped (peer dependency conflicts)");
    }

    #[test]
    fn test_conflict_display() {
        let conflict = PeerConflict {
            package: "plugin".to_string(),
            required: "^3.0.0".to_string(),
            actual: "4.0.0".to_string(),
        };
        assert_eq!(conflict.to_string(), "plugin requires ^3.0.0 (would be 4.0.0)");
    }

    #[test]
    fn test_plan_is_empty() {
        let mut plan = UpgradePlan::default();
        assert!(plan.is_empty());
        plan.skipped
            .push(SkippedUpgrade::new(Dependency::production("a", "1.0.0"), SkipReason::NotFound));
        assert!(plan.is_empty());
    }
}
