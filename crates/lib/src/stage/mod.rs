//! Build a project for WebAssembly and stage the resulting artifact.
//!
//! A build runs the toolchain in the project directory, then copies the
//! artifact from the toolchain's output directory to
//! `<project>/<name>.wasm`. Every failure aborts the build; nothing is
//! retried and nothing is cleaned up, because nothing is ever changed
//! outside the project directory.

pub mod layout;
pub mod toolchain;
pub mod types;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::BuilderConfig;

pub use layout::ArtifactLayout;
pub use types::{BuildError, BuildRequest, BuildResult, Profile};

/// Runs builds with a fixed [`BuilderConfig`].
#[derive(Debug, Clone, Default)]
pub struct ArtifactBuilder {
  config: BuilderConfig,
}

impl ArtifactBuilder {
  pub fn new(config: BuilderConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &BuilderConfig {
    &self.config
  }

  /// Build `request.target_dir` and stage its artifact.
  ///
  /// Paths in the returned [`BuildResult`] are joined onto `target_dir` as
  /// given, so a relative request yields relative paths.
  pub async fn build(&self, request: &BuildRequest) -> Result<BuildResult, BuildError> {
    let started = Instant::now();
    let dir = request.target_dir.as_path();

    if !dir.is_dir() {
      return Err(BuildError::InvalidDirectory(dir.to_path_buf()));
    }

    let name = match &request.artifact_name {
      Some(name) => {
        layout::validate_artifact_name(name)?;
        name.clone()
      }
      None => layout::derive_artifact_name(dir)?,
    };
    let artifact = ArtifactLayout::new(dir, &name, request.profile);

    info!(name = %name, profile = %request.profile, dir = %dir.display(), "building artifact");

    let args = toolchain::build_args(self.config.target, request.profile);
    let status = toolchain::run_toolchain(&self.config.toolchain, &args, dir, self.config.timeout).await?;

    let bytes = stage_artifact(&artifact.source, &artifact.destination).await?;

    info!(
      destination = %artifact.destination.display(),
      bytes,
      "artifact staged"
    );

    Ok(BuildResult {
      source_path: artifact.source,
      destination_path: artifact.destination,
      exit_code: status.code().unwrap_or_default(),
      profile: request.profile,
      bytes,
      duration: started.elapsed(),
    })
  }
}

/// Build `target_dir` with the configuration resolved from the environment.
pub async fn build(target_dir: impl AsRef<Path>, profile: Profile) -> Result<BuildResult, BuildError> {
  let request = BuildRequest::new(target_dir.as_ref(), profile);
  ArtifactBuilder::new(BuilderConfig::from_env()).build(&request).await
}

/// Copy `source` over `destination`.
///
/// The destination is not touched when the source is missing.
async fn stage_artifact(source: &Path, destination: &Path) -> Result<u64, BuildError> {
  let is_file = tokio::fs::metadata(source)
    .await
    .map(|meta| meta.is_file())
    .unwrap_or(false);
  if !is_file {
    return Err(BuildError::ArtifactMissing(source.to_path_buf()));
  }

  debug!(from = %source.display(), to = %destination.display(), "copying artifact");

  tokio::fs::copy(source, destination)
    .await
    .map_err(|source_err| BuildError::CopyFailure {
      from: source.to_path_buf(),
      to: destination.to_path_buf(),
      source: source_err,
    })
}
