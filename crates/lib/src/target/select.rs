//! Target selection for one command invocation.
//!
//! The query path decides the mode:
//! - inside an application's directory: that application alone
//! - exactly the manifest root: every application, dependencies first
//! - anywhere else: an error
//!
//! Without a multi-application manifest, the query path itself is the only
//! target.

use std::path::Path;

use tracing::debug;

use crate::manifest::Manifest;

use super::order::order_by_deps;
use super::paths::{app_dir, find_exact, manifest_root, normalize};
use super::types::{Selection, Target, TargetError};

/// Inputs for one selection.
///
/// Paths should be absolute; they are normalized lexically and never
/// resolved against the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct SelectRequest<'a> {
  /// The loaded manifest, if one was found.
  pub manifest: Option<&'a Manifest>,

  /// Location of the manifest file. Application keys are relative to its directory.
  pub manifest_path: &'a Path,

  /// The path the user targeted.
  pub query: &'a Path,

  /// Fail with `NoApplications` instead of selecting nothing.
  pub require_targets: bool,
}

impl<'a> SelectRequest<'a> {
  pub fn new(manifest: Option<&'a Manifest>, manifest_path: &'a Path, query: &'a Path) -> Self {
    Self {
      manifest,
      manifest_path,
      query,
      require_targets: true,
    }
  }

  /// Select nothing, rather than fail, when there are no applications.
  pub fn allow_empty(mut self) -> Self {
    self.require_targets = false;
    self
  }
}

/// Decide which applications the request targets.
///
/// # Errors
///
/// - `UnknownPath` if the query is neither inside an application nor the manifest root
/// - `CircularDependency` if whole-manifest ordering finds a cycle
/// - `NoApplications` if there is no manifest and targets are required
pub fn select<'a>(request: &SelectRequest<'a>) -> Result<Selection<'a>, TargetError> {
  let Some(apps) = request.manifest.and_then(Manifest::applications) else {
    return select_standalone(request);
  };

  if let Some((key, entry)) = find_exact(apps, request.manifest_path, request.query) {
    debug!(key, "query path selects a single application");
    return Ok(Selection::Single(Target {
      key: Some(key),
      dir: app_dir(request.manifest_path, key),
      entry: Some(entry),
    }));
  }

  if normalize(request.query) == manifest_root(request.manifest_path) {
    debug!(count = apps.len(), "query path is the manifest root, selecting all applications");
    return order_by_deps(apps, request.manifest_path).map(Selection::Ordered);
  }

  Err(TargetError::UnknownPath {
    path: request.query.to_path_buf(),
    manifest: request.manifest_path.to_path_buf(),
  })
}

/// Selection when the manifest has no `applications` mapping.
///
/// A manifest with no top-level fields (blank, or `{}`) describes no
/// application, the same as no manifest at all.
fn select_standalone<'a>(request: &SelectRequest<'a>) -> Result<Selection<'a>, TargetError> {
  let app = request.manifest.map(|manifest| &manifest.app).filter(|app| !app.is_empty());
  match app {
    Some(app) => {
      debug!("manifest describes a single standalone application");
      Ok(Selection::Single(Target {
        key: None,
        dir: normalize(request.query),
        entry: Some(app),
      }))
    }
    None if request.require_targets => Err(TargetError::NoApplications),
    None => Ok(Selection::Empty),
  }
}

/// Run `f` once per selected target, in selection order.
///
/// Each target is passed by reference and dropped once `f` returns, so no
/// per-target state outlives its call. The first error from selection or
/// from `f` stops the iteration and is returned.
pub fn each_app<'a, F, E>(request: &SelectRequest<'a>, mut f: F) -> Result<(), E>
where
  F: FnMut(&Target<'a>) -> Result<(), E>,
  E: From<TargetError>,
{
  for target in select(request)? {
    f(&target)?;
  }
  Ok(())
}
