//! Manifest file reading and writing
//!
//! Reads are fatal when the file is missing or unparsable. Writes go through a
//! sibling temp file that is renamed over the original.

use super::PackageJson;
use crate::error::ManifestError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A loaded manifest and where it came from
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub path: PathBuf,
    pub document: PackageJson,
}

/// Load and parse package.json
pub fn read_manifest(path: &Path) -> Result<ManifestFile, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::not_found(path),
        _ => ManifestError::read_error(path, e),
    })?;
    let document = PackageJson::parse(path, &content)?;
    debug!(path = %path.display(), "loaded manifest");
    Ok(ManifestFile {
        path: path.to_path_buf(),
        document,
    })
}

/// Persist a document as pretty JSON, atomically replacing `path`
pub fn write_manifest(path: &Path, document: &PackageJson) -> Result<(), ManifestError> {
    let content = document
        .to_pretty_string()
        .map_err(|e| ManifestError::InvalidDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, &content).map_err(|e| ManifestError::write_error(path, e))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(ManifestError::write_error(path, e));
    }

    info!(path = %path.display(), "wrote manifest");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package.json".to_string());
    path.with_file_name(format!(".{}.nph-tmp", file_name))
}
