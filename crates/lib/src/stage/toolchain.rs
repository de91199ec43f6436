//! Toolchain invocation.
//!
//! Runs the external build command in the project directory. The project
//! directory is handed to the child as its working directory; the working
//! directory of this process is never changed.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::stage::types::{BuildError, Profile};

/// Arguments passed to the toolchain for a build.
///
/// `build --target <target>` followed by the profile's flags.
pub fn build_args(target: &str, profile: Profile) -> Vec<String> {
  let mut args = vec!["build".to_string(), "--target".to_string(), target.to_string()];
  args.extend(profile.toolchain_flags().iter().map(|flag| flag.to_string()));
  args
}

/// Run the toolchain and wait for it to exit.
///
/// stdout and stderr are inherited so compiler diagnostics reach the user.
/// When `timeout` elapses the child is killed and reaped before
/// [`BuildError::Timeout`] is returned.
///
/// Returns the exit status only when it indicates success.
pub async fn run_toolchain(
  program: &OsStr,
  args: &[String],
  cwd: &Path,
  timeout: Option<Duration>,
) -> Result<ExitStatus, BuildError> {
  info!(program = %program.to_string_lossy(), args = ?args, cwd = %cwd.display(), "running toolchain");

  let mut command = Command::new(program);
  command
    .args(args)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .kill_on_drop(true);

  let mut child = command.spawn().map_err(|source| BuildError::Spawn {
    program: program.to_string_lossy().into_owned(),
    source,
  })?;

  debug!(pid = ?child.id(), "toolchain spawned");

  let status = match timeout {
    None => child.wait().await?,
    Some(limit) => {
      let waited = tokio::time::timeout(limit, child.wait()).await;
      match waited {
        Ok(status) => status?,
        Err(_) => {
          warn!(timeout = ?limit, "toolchain timed out, killing it");
          return Err(timed_out(limit, child.kill().await));
        }
      }
    }
  };

  debug!(status = %status, "toolchain exited");

  if !status.success() {
    return Err(BuildError::ToolchainFailure { code: status.code() });
  }

  Ok(status)
}

/// A timeout stays a timeout even when killing the child fails.
fn timed_out(limit: Duration, killed: std::io::Result<()>) -> BuildError {
  if let Err(err) = killed {
    warn!(error = %err, "failed to kill timed out toolchain");
  }
  BuildError::Timeout(limit)
}
