//! Terminal output for a build.
//!
//! Progress and errors go to stderr. stdout carries only the staged-artifact
//! report, as text or as the `BuildResult` JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use wasmstage_lib::{BuildResult, Profile};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub fn print_build_started(target_dir: &Path, profile: Profile, format: OutputFormat) {
  if format.is_json() {
    return;
  }
  eprintln!(
    "{} {} ({})",
    "Building".if_supports_color(Stream::Stderr, |s| s.cyan()),
    target_dir.display(),
    profile
  );
}

pub fn print_build_result(result: &BuildResult, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize build result")?;
    println!("{}", json);
    return Ok(());
  }

  println!(
    "{} {}",
    "Staged".if_supports_color(Stream::Stdout, |s| s.green()),
    result.destination_path.display()
  );
  for (label, value) in report_fields(result) {
    let label = format!("{:<8}", label);
    println!("  {} {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
  }
  Ok(())
}

pub fn print_error(err: &anyhow::Error) {
  eprintln!(
    "{} {:#}",
    "error:".if_supports_color(Stream::Stderr, |s| s.red()),
    err
  );
}

fn report_fields(result: &BuildResult) -> [(&'static str, String); 4] {
  [
    ("from", result.source_path.display().to_string()),
    ("profile", result.profile.to_string()),
    ("size", format_size(result.bytes)),
    ("took", format_elapsed(result.duration)),
  ]
}

/// Artifact size in bytes, with KiB/MiB for anything larger than a few KiB.
fn format_size(bytes: u64) -> String {
  const KIB: f64 = 1024.0;

  let b = bytes as f64;
  if b >= KIB * KIB {
    format!("{:.2} MiB ({} bytes)", b / (KIB * KIB), bytes)
  } else if b >= 4.0 * KIB {
    format!("{:.1} KiB ({} bytes)", b / KIB, bytes)
  } else {
    format!("{} bytes", bytes)
  }
}

/// Build time at millisecond resolution.
fn format_elapsed(duration: Duration) -> String {
  let millis = Duration::from_millis(duration.as_millis() as u64);
  humantime::format_duration(millis).to_string()
}
