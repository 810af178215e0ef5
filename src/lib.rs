//! nph - Node Package Helper library
//!
//! Core functionality behind the `nph` CLI:
//! - package.json script management
//! - dependency verification against the npm registry
//! - peer-aware upgrades of declared ranges
//! - deprecation reports for packages and code

pub mod cli;
pub mod commands;
pub mod config;
pub mod deprecation;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod process;
pub mod progress;
pub mod prompt;
pub mod registry;
pub mod suggest;
pub mod tree;
pub mod upgrade;
pub mod verify;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;
