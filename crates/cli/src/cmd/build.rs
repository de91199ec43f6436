//! Implementation of the `wasmstage` build.
//!
//! Runs the toolchain for the project directory and stages the artifact
//! next to the project's manifest.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use wasmstage_lib::config::{BuilderConfig, toolchain_program};
use wasmstage_lib::{ArtifactBuilder, BuildRequest, Profile};

use crate::output::{OutputFormat, print_build_result, print_build_started};

/// Everything the build command takes from the command line.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  pub target_dir: PathBuf,
  pub profile: Profile,
  pub artifact_name: Option<String>,
  pub toolchain: Option<OsString>,
  pub timeout: Option<Duration>,
  pub output: OutputFormat,
}

/// Execute the build.
///
/// Prints the staged artifact's paths, size and build time, or the
/// [`BuildResult`](wasmstage_lib::BuildResult) as JSON.
pub fn cmd_build(options: BuildOptions) -> Result<()> {
  let config = BuilderConfig::from_env()
    .with_toolchain(toolchain_program(options.toolchain))
    .with_timeout(options.timeout);
  debug!(?config, "resolved builder config");

  let mut request = BuildRequest::new(&options.target_dir, options.profile);
  if let Some(name) = options.artifact_name {
    request = request.with_artifact_name(name);
  }

  print_build_started(&options.target_dir, options.profile, options.output);

  let builder = ArtifactBuilder::new(config);
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt
    .block_on(builder.build(&request))
    .with_context(|| format!("Failed to build {}", options.target_dir.display()))?;

  print_build_result(&result, options.output)
}
