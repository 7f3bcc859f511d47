//! Local WildFly deployment
//!
//! Carries out a [`DeploymentPlan`]: copies the artifact, writes the
//! `.dodeploy` marker, and drives `jboss-cli.sh` in domain mode.

use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep, Instant};

use super::filesystem::{copy_verified, remove_marker, touch};
use super::process::{run_captured, run_inherited};
use crate::core::plan::{DeploymentKind, DeploymentPlan};
use crate::error::DeployError;

/// State of a standalone deployment after the marker was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// `.deployed` appeared
    Deployed,
    /// `.failed` appeared
    Failed,
    /// Neither marker appeared before the timeout
    Pending,
}

/// Result of the undeploy step in domain mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndeployOutcome {
    /// Previous deployment removed
    Removed,
    /// Undeploy failed or nothing was deployed; deployment continues
    Skipped(String),
}

/// Copy the artifact into the plan's target directory
pub fn copy_artifact(plan: &DeploymentPlan, checksum: &str) -> Result<PathBuf, DeployError> {
    tracing::info!(
        "Copying {} to {}",
        plan.artifact_path.display(),
        plan.target_dir.display()
    );
    copy_verified(&plan.artifact_path, &plan.target_dir, checksum)
}

/// Write `<artifact>.dodeploy` next to the copied artifact
///
/// Result markers from an earlier deployment are removed first, so only
/// markers WildFly writes for this deployment are seen by [`wait_for_marker`].
pub fn write_dodeploy(plan: &DeploymentPlan) -> Result<PathBuf, DeployError> {
    for stale in plan.result_markers() {
        remove_marker(&stale)?;
    }
    let marker = plan.dodeploy_marker();
    touch(&marker)?;
    Ok(marker)
}

/// Poll for `.deployed` / `.failed` until `timeout` elapses
pub async fn wait_for_marker(plan: &DeploymentPlan, timeout: Duration, interval: Duration) -> MarkerState {
    let deployed = plan.deployed_marker();
    let failed = plan.failed_marker();
    let deadline = Instant::now() + timeout;

    loop {
        if deployed.exists() {
            return MarkerState::Deployed;
        }
        if failed.exists() {
            return MarkerState::Failed;
        }
        if Instant::now() >= deadline {
            return MarkerState::Pending;
        }
        sleep(interval).await;
    }
}

/// Undeploy the artifact from its server group, tolerating failure
pub async fn undeploy(plan: &DeploymentPlan) -> UndeployOutcome {
    let Some(args) = plan.undeploy_args() else {
        return UndeployOutcome::Skipped("not a domain deployment".to_string());
    };

    match run_captured(&plan.jboss_cli(), &args, None).await {
        Ok(out) if out.status.success() => UndeployOutcome::Removed,
        Ok(out) => {
            tracing::debug!("Undeploy failed: {}", out.stderr.trim());
            UndeployOutcome::Skipped(first_line(&out.stdout, &out.stderr))
        }
        Err(e) => {
            tracing::debug!("Undeploy could not run: {e}");
            UndeployOutcome::Skipped(e.to_string())
        }
    }
}

/// Deploy the copied artifact to its server group
pub async fn deploy_via_cli(plan: &DeploymentPlan) -> Result<(), DeployError> {
    let (Some(args), DeploymentKind::Domain { server_group }) = (plan.deploy_args(), &plan.kind) else {
        return Ok(());
    };

    let status = run_inherited(&plan.jboss_cli(), &args, None)
        .await
        .map_err(|e| DeployError::CliFailed {
            server_group: server_group.clone(),
            error: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(DeployError::CliFailed {
            server_group: server_group.clone(),
            error: status.to_string(),
        })
    }
}

fn first_line(stdout: &str, stderr: &str) -> String {
    stderr
        .lines()
        .chain(stdout.lines())
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no output")
        .to_string()
}
