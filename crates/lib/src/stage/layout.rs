//! Where the toolchain leaves the artifact, and where it gets staged.
//!
//! ```text
//! <dir>/target/wasm32-unknown-unknown/{debug|release}/<name>.wasm   (source)
//! <dir>/<name>.wasm                                                  (destination)
//! ```

use std::path::{Component, Path, PathBuf};

use crate::consts::{WASM_EXTENSION, WASM_TARGET};
use crate::stage::types::{BuildError, Profile};

/// Toolchain build output directory, relative to the project directory.
const TARGET_DIR: &str = "target";

/// Resolved artifact locations for one project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
  pub source: PathBuf,
  pub destination: PathBuf,
}

impl ArtifactLayout {
  pub fn new(project_dir: &Path, name: &str, profile: Profile) -> Self {
    let file_name = artifact_file_name(name);
    Self {
      source: output_dir(project_dir, profile).join(&file_name),
      destination: project_dir.join(file_name),
    }
  }
}

/// Directory the toolchain writes artifacts for `profile` into.
pub fn output_dir(project_dir: &Path, profile: Profile) -> PathBuf {
  project_dir.join(TARGET_DIR).join(WASM_TARGET).join(profile.as_str())
}

pub fn artifact_file_name(name: &str) -> String {
  format!("{}.{}", name, WASM_EXTENSION)
}

/// Derives the artifact name from the project directory's basename.
///
/// The path is normalized lexically: made absolute against the current
/// directory, with `.` and `..` folded. Symlinks are not followed, so the
/// name is always the one the caller wrote.
pub fn derive_artifact_name(project_dir: &Path) -> Result<String, BuildError> {
  let absolute = std::path::absolute(project_dir)?;
  let normalized = normalize_lexically(&absolute);

  let Some(name) = normalized.file_name() else {
    return Err(BuildError::InvalidDirectory(project_dir.to_path_buf()));
  };
  name
    .to_str()
    .map(str::to_string)
    .ok_or_else(|| BuildError::InvalidArtifactName(name.to_string_lossy().into_owned()))
}

/// Folds `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        normalized.pop();
      }
      other => normalized.push(other),
    }
  }
  normalized
}

/// Checks that an explicit artifact name is exactly one normal path segment.
pub fn validate_artifact_name(name: &str) -> Result<(), BuildError> {
  if name.chars().any(std::path::is_separator) {
    return Err(BuildError::InvalidArtifactName(name.to_string()));
  }

  let mut components = Path::new(name).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(_)), None) => Ok(()),
    _ => Err(BuildError::InvalidArtifactName(name.to_string())),
  }
}
