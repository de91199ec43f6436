//! wasmstage-lib: build a crate for WebAssembly and stage the artifact
//!
//! This crate provides:
//! - `ArtifactBuilder`: runs the toolchain for `wasm32-unknown-unknown` and
//!   copies the artifact to `<project>/<name>.wasm`
//! - `BuilderConfig`: toolchain program, target and timeout
//! - `layout`: the toolchain's output path convention

pub mod config;
pub mod consts;
pub mod stage;


pub use config::BuilderConfig;
pub use stage::{ArtifactBuilder, BuildError, BuildRequest, BuildResult, Profile, build};
