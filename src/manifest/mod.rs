//! Manifest loading, editing and persistence
//!
//! This module provides:
//! - The package.json document model with order-preserving edits
//! - Reading and atomically writing the manifest file

mod package_json;
mod store;

pub use package_json::PackageJson;
pub use store::{read_manifest, write_manifest, ManifestFile};
