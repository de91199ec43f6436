//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

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

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding a project directory
/// and a copy of the fake toolchain it should run.
pub struct TestEnv {
  pub temp: TempDir,
  pub project: PathBuf,
  pub toolchain: PathBuf,
}

impl TestEnv {
  /// Create a project named `project_name` built by the fixture toolchain `script`.
  pub fn new(project_name: &str, script: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();

    let project = root.join(project_name);
    std::fs::create_dir_all(&project).unwrap();

    let toolchain = root.join("fake-cargo");
    std::fs::copy(fixture_path(script), &toolchain)
      .unwrap_or_else(|e| panic!("Failed to copy fixture {}: {}", script, e));
    std::fs::set_permissions(&toolchain, std::fs::Permissions::from_mode(0o755)).unwrap();

    Self {
      temp,
      project,
      toolchain,
    }
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.project.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Read a file relative to the project directory.
  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.project.join(relative_path)).unwrap()
  }

  /// Get a pre-configured Command for the wasmstage binary.
  ///
  /// `WASMSTAGE_CARGO` points at the fake toolchain and `CARGO` is removed
  /// so the real cargo running the tests is never picked up.
  pub fn wasmstage_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("wasmstage");
    cmd.env("WASMSTAGE_CARGO", &self.toolchain);
    cmd.env_remove("CARGO");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
