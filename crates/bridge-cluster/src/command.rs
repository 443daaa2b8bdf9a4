//! Bounded subprocess execution for helm and kubectl

use crate::error::{ClusterError, Result};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Run `program` with `args`, returning stdout on success.
///
/// The child is killed if it outlives `timeout`.
pub(crate) async fn run_tool(program: &str, args: &[String], timeout: Duration) -> Result<String> {
    if which::which(program).is_err() {
        return Err(ClusterError::ToolNotFound {
            tool: program.to_string(),
        });
    }

    debug!("Running: {} {}", program, args.join(" "));

    let output = tokio::time::timeout(
        timeout,
        Command::new(program).args(args).kill_on_drop(true).output(),
    )
    .await
    .map_err(|_| ClusterError::Timeout {
        tool: program.to_string(),
        secs: timeout.as_secs(),
    })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ClusterError::CommandFailed {
            tool: program.to_string(),
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
