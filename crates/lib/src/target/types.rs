//! Types for target selection.

use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::AppEntry;

/// Errors that can occur while selecting targets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
  /// The query path matches no application and is not the manifest root.
  #[error("path '{}' is not known to manifest '{}'", .path.display(), .manifest.display())]
  UnknownPath { path: PathBuf, manifest: PathBuf },

  /// Application dependencies form a cycle.
  #[error("circular dependency detected: {chain}")]
  CircularDependency { chain: String },

  /// There is neither a manifest nor standalone application info.
  #[error("no applications")]
  NoApplications,
}

/// One application selected for a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Target<'a> {
  /// Key in the manifest's application mapping. `None` for a standalone application.
  pub key: Option<&'a str>,

  /// Normalized absolute directory of the application.
  pub dir: PathBuf,

  /// Declared configuration. `None` for a dependency the manifest does not declare.
  pub entry: Option<&'a AppEntry>,
}

impl<'a> Target<'a> {
  pub fn name(&self) -> Option<&'a str> {
    self.entry.and_then(|entry| entry.name.as_deref())
  }

  /// Name for display: the declared name, else the manifest key, else the directory.
  pub fn display_name(&self) -> String {
    match (self.name(), self.key) {
      (Some(name), _) => name.to_string(),
      (None, Some(key)) => key.to_string(),
      (None, None) => self.dir.display().to_string(),
    }
  }
}

/// The outcome of target selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection<'a> {
  /// No targets; only produced when the caller tolerates an empty selection.
  #[default]
  Empty,

  /// The query path named exactly one application.
  Single(Target<'a>),

  /// Every application in the manifest, dependencies first.
  Ordered(Vec<Target<'a>>),
}

impl<'a> Selection<'a> {
  pub fn targets(&self) -> &[Target<'a>] {
    match self {
      Selection::Empty => &[],
      Selection::Single(target) => std::slice::from_ref(target),
      Selection::Ordered(targets) => targets,
    }
  }

  pub fn len(&self) -> usize {
    self.targets().len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets().is_empty()
  }

  pub fn is_single(&self) -> bool {
    matches!(self, Selection::Single(_))
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Target<'a>> {
    self.targets().iter()
  }
}

impl<'a> IntoIterator for Selection<'a> {
  type Item = Target<'a>;
  type IntoIter = std::vec::IntoIter<Target<'a>>;

  fn into_iter(self) -> Self::IntoIter {
    match self {
      Selection::Empty => Vec::new().into_iter(),
      Selection::Single(target) => vec![target].into_iter(),
      Selection::Ordered(targets) => targets.into_iter(),
    }
  }
}

impl<'s, 'a> IntoIterator for &'s Selection<'a> {
  type Item = &'s Target<'a>;
  type IntoIter = std::slice::Iter<'s, Target<'a>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
