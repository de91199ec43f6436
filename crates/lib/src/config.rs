//! Builder configuration.
//!
//! Resolves which toolchain program to invoke and carries the optional
//! timeout for the toolchain run.

use std::ffi::OsString;
use std::time::Duration;

use crate::consts::{CARGO_ENV, DEFAULT_TOOLCHAIN, TOOLCHAIN_ENV, WASM_TARGET};

/// Configuration shared by every build an [`ArtifactBuilder`](crate::stage::ArtifactBuilder) runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
  /// Toolchain program, looked up on PATH when not a path itself.
  pub toolchain: OsString,

  /// Compilation target identifier handed to the toolchain.
  pub target: &'static str,

  /// Upper bound on the toolchain run. `None` waits indefinitely.
  pub timeout: Option<Duration>,
}

impl BuilderConfig {
  /// Configuration using the toolchain resolved from the environment.
  pub fn from_env() -> Self {
    Self {
      toolchain: toolchain_program(None),
      target: WASM_TARGET,
      timeout: None,
    }
  }

  pub fn with_toolchain(mut self, toolchain: impl Into<OsString>) -> Self {
    self.toolchain = toolchain.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }
}

impl Default for BuilderConfig {
  fn default() -> Self {
    Self::from_env()
  }
}

/// Returns the toolchain program to run.
///
/// Precedence: the explicit value, then `WASMSTAGE_CARGO`, then `CARGO`,
/// then plain `cargo` from PATH. Empty values are ignored.
pub fn toolchain_program(explicit: Option<OsString>) -> OsString {
  explicit
    .filter(|p| !p.is_empty())
    .or_else(|| std::env::var_os(TOOLCHAIN_ENV).filter(|p| !p.is_empty()))
    .or_else(|| std::env::var_os(CARGO_ENV).filter(|p| !p.is_empty()))
    .unwrap_or_else(|| OsString::from(DEFAULT_TOOLCHAIN))
}
