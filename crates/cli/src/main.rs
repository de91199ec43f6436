mod cmd;
mod output;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wasmstage_lib::consts::TOOLCHAIN_ENV;
use wasmstage_lib::{BuildError, Profile};

use cmd::{BuildOptions, cmd_build};
use output::{OutputFormat, print_error};

/// wasmstage - build a crate for wasm32-unknown-unknown and stage the artifact
#[derive(Parser, Debug)]
#[command(name = "wasmstage")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project directory to build
  target_dir: PathBuf,

  /// Build with the release profile
  #[arg(short, long)]
  release: bool,

  /// Artifact name (default: the project directory's name)
  #[arg(long)]
  name: Option<String>,

  /// Toolchain program to invoke
  #[arg(long, env = TOOLCHAIN_ENV)]
  cargo: Option<OsString>,

  /// Kill the toolchain if it runs longer than this (e.g., "90s", "5m")
  #[arg(long, value_parser = humantime::parse_duration)]
  timeout: Option<Duration>,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  output: OutputFormat,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let options = BuildOptions {
    target_dir: cli.target_dir,
    profile: Profile::from_release(cli.release),
    artifact_name: cli.name,
    toolchain: cli.cargo,
    timeout: cli.timeout,
    output: cli.output,
  };

  match cmd_build(options) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&err);
      let code = err.downcast_ref::<BuildError>().map_or(1, BuildError::exit_code);
      ExitCode::from(u8::try_from(code).unwrap_or(1))
    }
  }
}
