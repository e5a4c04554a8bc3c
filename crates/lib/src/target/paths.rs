//! Lexical path resolution.
//!
//! Application keys are relative to the manifest file's directory. Every
//! comparison happens on normalized paths built from strings alone: nothing
//! here reads the filesystem, follows symlinks, or checks existence.

use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::manifest::{AppEntry, Applications};

/// Normalize a path (resolve `.` and `..`) without touching the filesystem.
///
/// A `..` with nothing left to pop (at the root, or at the start of a
/// relative path) is dropped.
pub fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::ParentDir => {
        normalized.pop();
      }
      Component::CurDir => {}
      _ => normalized.push(component),
    }
  }
  normalized
}

/// The directory containing the manifest file, normalized.
pub fn manifest_root(manifest_file: &Path) -> PathBuf {
  normalize(manifest_file.parent().unwrap_or(Path::new("")))
}

/// The normalized directory of the application declared under `relative`.
pub fn app_dir(manifest_file: &Path, relative: &str) -> PathBuf {
  normalize(&manifest_root(manifest_file).join(relative))
}

/// Find the application whose directory is `query` or contains it.
///
/// Containment is compared component-wise, so `/srv/app` does not contain
/// `/srv/application`. When several applications contain the query, the
/// first in declared order wins.
pub fn find_exact<'a>(
  apps: &'a Applications,
  manifest_file: &Path,
  query: &Path,
) -> Option<(&'a str, &'a AppEntry)> {
  let query = normalize(query);
  apps.iter().find(|(key, _)| {
    let dir = app_dir(manifest_file, key);
    let matched = query.starts_with(&dir);
    trace!(key, dir = %dir.display(), matched, "matching query path");
    matched
  })
}
