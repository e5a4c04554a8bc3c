//! Order command implementation.
//!
//! Prints every application of the manifest, dependencies first, no matter
//! which directory the command runs from.

use std::path::Path;

use anyhow::{Context, Result};

use stackup_lib::target::order_by_deps;

use super::{print_target, target_json};
use crate::locate::{locate, query_path};
use crate::output::{OutputFormat, pluralize, print_info, print_json, print_success};

pub fn cmd_order(manifest: Option<&Path>, format: OutputFormat) -> Result<()> {
  let cwd = query_path(None)?;
  let location = locate(manifest, &cwd)?;

  let loaded = location
    .manifest
    .as_ref()
    .with_context(|| format!("No manifest found at {}", location.path.display()))?;
  let apps = loaded
    .applications()
    .with_context(|| format!("Manifest {} has no applications", location.path.display()))?;

  let ordered = order_by_deps(apps, &location.path)?;

  if format.is_json() {
    let targets: Vec<_> = ordered.iter().map(target_json).collect();
    return print_json(&serde_json::json!({
      "manifest": location.path,
      "targets": targets,
    }));
  }

  if ordered.is_empty() {
    print_info("Manifest declares no applications.");
    return Ok(());
  }

  print_success(&format!("{} in dependency order", pluralize(ordered.len(), "application")));
  for (i, target) in ordered.iter().enumerate() {
    print_target(i + 1, target);
  }
  Ok(())
}
