/// Target triple passed to the toolchain. Also the directory cargo nests
/// per-target output under.
pub const WASM_TARGET: &str = "wasm32-unknown-unknown";

pub const WASM_EXTENSION: &str = "wasm";

/// Environment variable overriding the toolchain program.
pub const TOOLCHAIN_ENV: &str = "WASMSTAGE_CARGO";

/// Set by cargo for build scripts and cargo subcommands.
pub const CARGO_ENV: &str = "CARGO";

pub const DEFAULT_TOOLCHAIN: &str = "cargo";
