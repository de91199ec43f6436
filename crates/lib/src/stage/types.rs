//! Types for building and staging an artifact.
//!
//! This module defines the build request, the result handed back after
//! staging, and the error type covering every failure of a single build.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Build configuration selecting unoptimised or optimised compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
  #[default]
  Debug,
  Release,
}

impl Profile {
  pub fn from_release(release: bool) -> Self {
    if release { Profile::Release } else { Profile::Debug }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Profile::Debug => "debug",
      Profile::Release => "release",
    }
  }

  /// Extra flags handed to the toolchain for this profile.
  pub fn toolchain_flags(&self) -> &'static [&'static str] {
    match self {
      Profile::Debug => &[],
      Profile::Release => &["--release"],
    }
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A single build of one project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
  /// Project directory. Used as the toolchain's working directory and as
  /// the base for every artifact path.
  pub target_dir: PathBuf,

  pub profile: Profile,

  /// Replaces the name derived from the directory's basename.
  pub artifact_name: Option<String>,
}

impl BuildRequest {
  pub fn new(target_dir: impl Into<PathBuf>, profile: Profile) -> Self {
    Self {
      target_dir: target_dir.into(),
      profile,
      artifact_name: None,
    }
  }

  pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
    self.artifact_name = Some(name.into());
    self
  }
}

/// Outcome of a successful build and copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
  /// Where the toolchain wrote the artifact.
  pub source_path: PathBuf,

  /// Where the artifact was staged.
  pub destination_path: PathBuf,

  /// Exit code observed from the toolchain.
  pub exit_code: i32,

  pub profile: Profile,

  /// Size of the staged artifact.
  pub bytes: u64,

  #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
  pub duration: Duration,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(duration.as_millis() as u64)
}

/// Errors that can occur while building and staging an artifact.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The target path is missing, not a directory, or has no basename.
  #[error("not a project directory: {}", .0.display())]
  InvalidDirectory(PathBuf),

  /// An artifact name override is not a single path segment.
  #[error("invalid artifact name: {0:?}")]
  InvalidArtifactName(String),

  /// The toolchain program could not be started.
  #[error("failed to start toolchain {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The toolchain exited unsuccessfully. `None` when killed by a signal.
  #[error("toolchain failed with exit code {}", display_code(.code))]
  ToolchainFailure { code: Option<i32> },

  /// The toolchain succeeded but the artifact is not where it should be.
  #[error("artifact not found at {}", .0.display())]
  ArtifactMissing(PathBuf),

  /// Copying the artifact into place failed.
  #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
  CopyFailure {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The toolchain ran longer than the configured limit and was killed.
  #[error("toolchain timed out after {0:?}")]
  Timeout(Duration),

  /// I/O error while supervising the toolchain.
  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

fn display_code(code: &Option<i32>) -> String {
  match code {
    Some(code) => code.to_string(),
    None => "none (terminated by signal)".to_string(),
  }
}

impl BuildError {
  /// Process exit code a CLI should report for this error.
  ///
  /// Toolchain failures propagate the toolchain's own code; timeouts use
  /// 124 like coreutils `timeout`; everything else is 1.
  pub fn exit_code(&self) -> i32 {
    match self {
      BuildError::ToolchainFailure { code: Some(code) } if (1..=255).contains(code) => *code,
      BuildError::Timeout(_) => 124,
      _ => 1,
    }
  }
}
