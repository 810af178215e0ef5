//! Declared version ranges
//!
//! Handles range strings as they appear in package.json:
//! - exact: `1.2.3`
//! - caret / tilde: `^1.2.3`, `~1.2.3`
//! - comparators and compound ranges: `>=1.0.0`, `>=1.0.0 <2.0.0`, `^1 || ^2`

use crate::version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared range with its rewrite-relevant parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    /// The raw range string as it appears in the manifest
    pub raw: String,
    /// The range with every leading operator removed
    pub bare: String,
    /// Caret or tilde prefix preserved on rewrite (empty for anything else)
    pub prefix: String,
}

impl VersionRange {
    /// Split a raw range into its prefix and bare version
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let bare = version::strip_prefix(&raw).trim().to_string();
        let prefix = version::range_prefix(&raw).to_string();
        Self { raw, bare, prefix }
    }

    /// Formats a new version while preserving the caret/tilde prefix
    pub fn format_updated(&self, new_version: &str) -> String {
        format!("{}{}", self.prefix, new_version)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
