//! Dependency ordering of manifest applications.
//!
//! Applications are emitted depth-first with dependencies before dependents.
//! Traversal keeps an explicit work stack, so long dependency chains do not
//! grow the call stack.
//!
//! # Algorithm Overview
//!
//! Progress is tracked in two sets keyed by normalized application directory:
//! - `visiting`: applications on the current dependency path. An application
//!   is marked before its dependencies are expanded, so meeting it again
//!   before it is emitted means the dependencies form a cycle.
//! - `done`: applications already emitted. Meeting one again is a no-op.
//!
//! Unrelated applications keep their declared order, and the dependencies of
//! one application are expanded in the order its `depends-on` lists them.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::manifest::{AppEntry, Applications};

use super::paths::app_dir;
use super::types::{Target, TargetError};

/// Order every application so each appears after all of its dependencies.
///
/// A dependency that is not a key in `apps` is still ordered by its path and
/// emitted with no entry.
///
/// # Errors
///
/// Returns `CircularDependency` if any application depends on itself,
/// directly or transitively. No partial order is returned.
pub fn order_by_deps<'a>(apps: &'a Applications, manifest_file: &Path) -> Result<Vec<Target<'a>>, TargetError> {
  let mut index: HashMap<PathBuf, (&'a str, &'a AppEntry)> = HashMap::with_capacity(apps.len());
  for (key, entry) in apps.iter() {
    match index.entry(app_dir(manifest_file, key)) {
      Entry::Occupied(existing) => {
        warn!(
          key,
          first = existing.get().0,
          dir = %existing.key().display(),
          "duplicate application directory, keeping the first entry"
        );
      }
      Entry::Vacant(slot) => {
        slot.insert((key, entry));
      }
    }
  }

  let mut orderer = DependencyOrderer {
    manifest_file,
    index,
    visiting: HashSet::new(),
    done: HashSet::new(),
    ordered: Vec::with_capacity(apps.len()),
  };

  for (key, entry) in apps.iter() {
    let dir = app_dir(manifest_file, key);
    if orderer.done.contains(&dir) {
      trace!(key, "already ordered");
      continue;
    }
    orderer.visit(dir, key, Some(entry))?;
  }

  debug!(count = orderer.ordered.len(), "ordered applications by dependencies");
  Ok(orderer.ordered)
}

/// A pending application on the work stack.
struct Frame<'a> {
  dir: PathBuf,
  key: &'a str,
  entry: Option<&'a AppEntry>,
  /// Index of the next dependency to expand.
  next_dep: usize,
}

struct DependencyOrderer<'a, 'p> {
  manifest_file: &'p Path,
  index: HashMap<PathBuf, (&'a str, &'a AppEntry)>,
  visiting: HashSet<PathBuf>,
  done: HashSet<PathBuf>,
  ordered: Vec<Target<'a>>,
}

impl<'a> DependencyOrderer<'a, '_> {
  /// Emit `key` after all of its transitive dependencies.
  fn visit(&mut self, dir: PathBuf, key: &'a str, entry: Option<&'a AppEntry>) -> Result<(), TargetError> {
    self.visiting.insert(dir.clone());
    let mut stack = vec![Frame {
      dir,
      key,
      entry,
      next_dep: 0,
    }];

    while let Some(frame) = stack.last_mut() {
      let deps = frame.entry.map(AppEntry::depends_on).unwrap_or_default();

      if let Some(dep) = deps.get(frame.next_dep) {
        frame.next_dep += 1;
        let dependent = frame.key;
        let dep_dir = app_dir(self.manifest_file, dep);

        if self.visiting.contains(&dep_dir) {
          return Err(cycle_error(&stack, &dep_dir, dep));
        }
        if self.done.contains(&dep_dir) {
          continue;
        }

        let (dep_key, dep_entry) = match self.index.get(&dep_dir) {
          Some(&(known_key, known_entry)) => (known_key, Some(known_entry)),
          None => {
            warn!(dependent, dependency = %dep, "dependency is not declared in the manifest");
            (dep.as_str(), None)
          }
        };

        trace!(dependent, dependency = dep_key, "expanding dependency");
        self.visiting.insert(dep_dir.clone());
        stack.push(Frame {
          dir: dep_dir,
          key: dep_key,
          entry: dep_entry,
          next_dep: 0,
        });
      } else if let Some(frame) = stack.pop() {
        self.visiting.remove(&frame.dir);
        trace!(key = frame.key, "dependencies satisfied");
        self.ordered.push(Target {
          key: Some(frame.key),
          dir: frame.dir.clone(),
          entry: frame.entry,
        });
        self.done.insert(frame.dir);
      }
    }

    Ok(())
  }
}

/// Build the error for a dependency that leads back onto the current path.
fn cycle_error(stack: &[Frame<'_>], dep_dir: &Path, dep: &str) -> TargetError {
  let start = stack.iter().position(|frame| frame.dir == dep_dir).unwrap_or(0);
  let mut chain: Vec<&str> = stack[start..].iter().map(|frame| frame.key).collect();
  chain.push(dep);
  TargetError::CircularDependency {
    chain: chain.join(" -> "),
  }
}
