//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary project directory holding `manifest.yml`.
pub struct TestEnv {
  pub temp: TempDir,
  pub root: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file copied to `manifest.yml`.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    env.write_file("manifest.yml", &fixture_content(name));
    env
  }

  /// Create an empty project directory.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    Self { temp, root }
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.root.join("manifest.yml")
  }

  pub fn read_manifest(&self) -> String {
    std::fs::read_to_string(self.manifest_path()).unwrap()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Create a directory relative to the project root and return its path.
  pub fn mkdir(&self, relative_path: &str) -> PathBuf {
    let path = self.root.join(relative_path);
    std::fs::create_dir_all(&path).unwrap();
    path
  }

  /// Get a Command for the stackup binary running in `dir`.
  ///
  /// `STACKUP_MANIFEST` and `RUST_LOG` are cleared so the caller's
  /// environment cannot leak into the test.
  pub fn stackup_cmd_in(&self, dir: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("stackup");
    cmd.current_dir(dir);
    cmd.env_remove("STACKUP_MANIFEST");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Get a Command for the stackup binary running in the project root.
  pub fn stackup_cmd(&self) -> Command {
    self.stackup_cmd_in(&self.root)
  }
}

/// Parse the JSON printed on stdout.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
  serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
    panic!(
      "stdout is not JSON ({}): {}",
      e,
      String::from_utf8_lossy(&output.stdout)
    )
  })
}

/// Target names, in order, from `--format json` output.
pub fn target_names(json: &serde_json::Value) -> Vec<String> {
  json["targets"]
    .as_array()
    .unwrap()
    .iter()
    .map(|t| t["name"].as_str().or(t["key"].as_str()).unwrap().to_string())
    .collect()
}
