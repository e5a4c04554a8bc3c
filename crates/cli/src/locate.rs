//! Manifest and query path resolution for CLI commands.
//!
//! The manifest is taken from `--manifest` (or `STACKUP_MANIFEST`), else the
//! nearest `manifest.yml` at or above the query path. Paths handed to the
//! selection core are absolute, and canonical when they exist so that a
//! symlinked working directory still matches the manifest's location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use stackup_lib::consts::MANIFEST_FILENAME;
use stackup_lib::manifest::{Manifest, store};

/// A manifest location and its contents, if the file exists.
#[derive(Debug)]
pub struct ManifestLocation {
  pub path: PathBuf,
  pub manifest: Option<Manifest>,
}

/// Resolve a user-supplied path to an absolute one.
pub fn absolute(path: &Path) -> Result<PathBuf> {
  if let Ok(canonical) = dunce::canonicalize(path) {
    return Ok(canonical);
  }
  std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// The path a command targets: the argument if given, else the working directory.
pub fn query_path(path: Option<&Path>) -> Result<PathBuf> {
  match path {
    Some(path) => absolute(path),
    None => {
      let cwd = std::env::current_dir().context("Failed to determine current directory")?;
      Ok(dunce::simplified(&cwd).to_path_buf())
    }
  }
}

/// Find and load the manifest governing `start`.
///
/// When no manifest exists the location defaults to `start/manifest.yml`
/// and `manifest` is `None`.
pub fn locate(explicit: Option<&Path>, start: &Path) -> Result<ManifestLocation> {
  let path = match explicit {
    Some(path) => absolute(path)?,
    None => store::find_manifest(start).unwrap_or_else(|| start.join(MANIFEST_FILENAME)),
  };

  let manifest =
    store::load_optional(&path).with_context(|| format!("Failed to load manifest: {}", path.display()))?;

  debug!(path = %path.display(), found = manifest.is_some(), "located manifest");
  Ok(ManifestLocation { path, manifest })
}
