//! YAML manifests of `Repository` resources.
//!
//! Used to feed desired/observed pairs from files, e.g. test fixtures or
//! `kubectl get -o yaml` dumps.

use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::types::Repository;

/// Parse a manifest from a YAML string.
///
/// `origin` only labels parse errors.
pub fn from_str_at(yaml: &str, origin: &Path) -> Result<Repository, ManifestError> {
    serde_yaml::from_str(yaml).map_err(|e| ManifestError::Parse {
        path: origin.to_path_buf(),
        source: e,
    })
}

/// Parse a manifest that did not come from a file.
pub fn from_str(yaml: &str) -> Result<Repository, ManifestError> {
    from_str_at(yaml, Path::new("<inline>"))
}

/// Load a manifest from `path`.
///
/// Returns `ManifestError::NotFound` if absent,
/// `ManifestError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Repository, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    from_str_at(&contents, path)
}

pub fn to_string(repository: &Repository) -> Result<String, ManifestError> {
    Ok(serde_yaml::to_string(repository)?)
}

/// Atomically write a manifest: serialize → `.tmp` sibling → `rename`.
pub fn save_at(path: &Path, repository: &Repository) -> Result<(), ManifestError> {
    let tmp_path = tmp_sibling(path);
    let yaml = to_string(repository)?;
    std::fs::write(&tmp_path, yaml)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
