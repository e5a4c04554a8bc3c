//! Set command implementation.
//!
//! Writes one field of one application and saves the manifest.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_yaml::Value;
use tracing::debug;

use stackup_lib::manifest::store;

use crate::locate::{locate, query_path};
use crate::output::{OutputFormat, print_json, print_success};

pub fn cmd_set(manifest: Option<&Path>, app: &str, key: &str, value: &str, format: OutputFormat) -> Result<()> {
  let keys: Vec<&str> = key.split('.').collect();
  if keys.iter().any(|k| k.is_empty()) {
    bail!("Invalid key '{}': segments cannot be empty", key);
  }

  let value: Value = serde_yaml::from_str(value).with_context(|| format!("Invalid value for {}: {}", key, value))?;

  let cwd = query_path(None)?;
  let location = locate(manifest, &cwd)?;
  let mut edited = location.manifest.unwrap_or_default();

  debug!(app, key, "setting application field");
  edited
    .set_app_field(app, &keys, value)
    .with_context(|| format!("Failed to set {} for {}", key, app))?;
  store::save(&edited, &location.path)
    .with_context(|| format!("Failed to save manifest: {}", location.path.display()))?;

  if format.is_json() {
    return print_json(&serde_json::json!({
      "manifest": location.path,
      "app": app,
      "key": key,
    }));
  }

  print_success(&format!("Manifest written to {}.", location.path.display()));
  Ok(())
}
