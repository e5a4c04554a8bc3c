//! Test utilities for stackup-lib.
//!
//! Manifests in tests live at a fixed, fake location; nothing here touches
//! the filesystem.

use std::path::PathBuf;

use crate::manifest::Manifest;
use crate::target::Target;

/// Location of the manifest file used by path-based tests.
pub fn manifest_file() -> PathBuf {
  PathBuf::from("/srv/project/manifest.yml")
}

/// Parse a manifest from YAML, panicking on malformed test input.
pub fn manifest_from_yaml(yaml: &str) -> Manifest {
  Manifest::from_yaml(yaml).unwrap_or_else(|e| panic!("invalid test manifest: {}", e))
}

/// Manifest keys of `targets`, in order. Standalone targets show as `<standalone>`.
pub fn ordered_keys(targets: &[Target<'_>]) -> Vec<String> {
  targets
    .iter()
    .map(|target| target.key.unwrap_or("<standalone>").to_string())
    .collect()
}
