//! Manifest storage.
//!
//! Reads and writes manifest files, and locates the manifest governing a
//! directory.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::MANIFEST_FILENAME;

use super::types::{Manifest, ManifestError};

/// Load a manifest from disk.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
  let content = fs::read_to_string(path).map_err(ManifestError::Read)?;
  Manifest::from_yaml(&content)
}

/// Load a manifest from disk, returning `Ok(None)` if the file doesn't exist.
pub fn load_optional(path: &Path) -> Result<Option<Manifest>, ManifestError> {
  match fs::read_to_string(path) {
    Ok(content) => Manifest::from_yaml(&content).map(Some),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(ManifestError::Read(e)),
  }
}

/// Save a manifest.
///
/// Uses atomic write (write to temp, then rename) to prevent corruption.
pub fn save(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
  let content = manifest.to_yaml()?;

  let mut temp_name = path
    .file_name()
    .unwrap_or(OsStr::new(MANIFEST_FILENAME))
    .to_os_string();
  temp_name.push(".tmp");
  let temp_path = path.with_file_name(temp_name);

  fs::write(&temp_path, &content).map_err(ManifestError::Write)?;
  fs::rename(&temp_path, path).map_err(ManifestError::Write)?;

  debug!(path = %path.display(), "manifest written");
  Ok(())
}

/// Find the manifest file for `start`, searching it and then each ancestor.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
  start
    .ancestors()
    .map(|dir| dir.join(MANIFEST_FILENAME))
    .find(|candidate| candidate.is_file())
}
