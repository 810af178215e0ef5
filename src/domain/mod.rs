//! Core domain models for nph
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency map kinds and declared ranges
//! - Dependency information structures
//! - Verification, upgrade and deprecation results

mod dependency;
mod dependency_type;
mod deprecation;
mod upgrade;
mod verification;
mod version_range;

pub use dependency::Dependency;
pub use dependency_type::DependencyType;
pub use deprecation::{DeprecatedPackage, DeprecatedPattern, DeprecationReport};
pub use upgrade::{PeerConflict, SkipReason, SkippedUpgrade, UpgradeCandidate, UpgradePlan};
pub use verification::{ManifestFix, VerificationResult};
pub use version_range::VersionRange;
