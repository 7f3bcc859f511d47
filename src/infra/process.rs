//! External process execution
//!
//! Thin wrappers over `tokio::process` for the tools jmw drives.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Captured result of a quiet command
#[derive(Debug)]
pub struct Captured {
    /// Exit status
    pub status: ExitStatus,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// Run a command with inherited stdio, returning its exit status
pub async fn run_inherited<I, S>(program: &Path, args: I, cwd: Option<&Path>) -> std::io::Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!("Running {:?}", cmd.as_std());
    cmd.status().await
}

/// Run a command and capture its output
pub async fn run_captured<I, S>(program: &Path, args: I, cwd: Option<&Path>) -> std::io::Result<Captured>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!("Running {:?}", cmd.as_std());
    let output = cmd.output().await?;
    Ok(Captured {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
