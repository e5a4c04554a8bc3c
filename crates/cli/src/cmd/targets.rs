//! Targets command implementation.
//!
//! Resolves which applications a command run from PATH would act on.

use std::path::Path;

use anyhow::Result;

use stackup_lib::target::{SelectRequest, Selection, select};

use super::{print_target, target_json};
use crate::locate::{locate, query_path};
use crate::output::{OutputFormat, pluralize, print_info, print_json, print_success};

pub fn cmd_targets(manifest: Option<&Path>, path: Option<&Path>, allow_empty: bool, format: OutputFormat) -> Result<()> {
  let query = query_path(path)?;
  let location = locate(manifest, &query)?;

  let mut request = SelectRequest::new(location.manifest.as_ref(), &location.path, &query);
  if allow_empty {
    request = request.allow_empty();
  }
  let selection = select(&request)?;

  if format.is_json() {
    let mode = match &selection {
      Selection::Empty => "empty",
      Selection::Single(_) => "single",
      Selection::Ordered(_) => "ordered",
    };
    let targets: Vec<_> = selection.iter().map(target_json).collect();
    return print_json(&serde_json::json!({
      "manifest": location.path,
      "mode": mode,
      "targets": targets,
    }));
  }

  if selection.is_empty() {
    print_info("No applications selected.");
    return Ok(());
  }

  print_success(&format!("{} selected", pluralize(selection.len(), "target")));
  for (i, target) in selection.iter().enumerate() {
    print_target(i + 1, target);
  }
  Ok(())
}
