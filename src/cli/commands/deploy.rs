//! CLI command implementation for `jmw deploy`
//!
//! Also hosts the deployment flow `jmw build` continues into once Maven
//! produced an artifact.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::output::{create_spinner, say, section, status};
use crate::cli::prompt;
use crate::config::defaults::{MARKER_POLL_INTERVAL, MARKER_TIMEOUT};
use crate::core::detector::ProjectInfo;
use crate::core::plan::{DeploymentKind, DeploymentPlan};
use crate::core::remote::{select_client, ClientSelection, RemoteGuide};
use crate::core::restart::{restart_commands, RestartInput, RestartVerdict, Severity};
use crate::core::session::Session;
use crate::error::DeployError;
use crate::infra::deploy::{self as local, MarkerState, UndeployOutcome};
use crate::infra::filesystem::sha256_file;
use crate::infra::git;

/// Options shared by `deploy` and `build`
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Client to print remote instructions for
    pub client: Option<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Print the `jboss-cli.sh` commands instead of running them
    pub no_cli: bool,
}

/// Execute the deploy command
pub async fn execute(
    cwd: &Path,
    config_path: Option<&Path>,
    artifact: &Path,
    options: &DeployOptions,
) -> Result<()> {
    let artifact = absolute(cwd, artifact);
    if !artifact.is_file() {
        return Err(DeployError::ArtifactNotFound { path: artifact }.into());
    }
    let artifact = artifact.canonicalize().unwrap_or(artifact);

    let session = Session::open(cwd, config_path).context("Failed to load configuration")?;
    let info = session
        .detect(artifact.parent())
        .context("Failed to detect project")?;

    deploy_artifact(&session, &info, &artifact, options).await
}

/// Plan, confirm, and carry out a local deployment, then print follow-ups
pub async fn deploy_artifact(
    session: &Session,
    info: &ProjectInfo,
    artifact: &Path,
    options: &DeployOptions,
) -> Result<()> {
    let plan = DeploymentPlan::new(info, artifact)?;
    let client = select_client(&info.name, &info.config.clients, options.client.as_deref())?;
    let checksum = sha256_file(artifact)
        .with_context(|| format!("Failed to read artifact: {}", artifact.display()))?;

    show_plan(&plan, &checksum);

    if !options.yes {
        say!();
        let proceed = prompt::confirm_stdin("Proceed with deployment?")
            .context("Failed to read confirmation")?;
        if !proceed {
            say!("Deployment cancelled.");
            return Ok(());
        }
    }

    say!();
    run_plan(&plan, &checksum, options.no_cli).await?;

    let changed_files = git::changed_files(&info.module.path).await;
    let matcher = session.restart_matcher(&info.config)?;
    let verdict = matcher.classify(&RestartInput {
        artifact_name: &plan.artifact_name,
        changed_files: &changed_files,
        global_module: plan.is_global(),
    });
    show_restart(&plan, info, &verdict);

    show_remote(&plan, client);
    Ok(())
}

fn show_plan(plan: &DeploymentPlan, checksum: &str) {
    section("📦 LOCAL DEPLOYMENT");
    for line in plan.summary() {
        say!("{line}");
    }
    say!("SHA-256: {checksum}");
    say!("\nCommands:");
    for (i, step) in plan.steps().iter().enumerate() {
        say!("  {}. {step}", i + 1);
    }
}

async fn run_plan(plan: &DeploymentPlan, checksum: &str, no_cli: bool) -> Result<()> {
    match &plan.kind {
        DeploymentKind::Global { .. } => {
            say!("📦 Copying to global module directory...");
            say!("   {}", plan.target_dir.display());
            local::copy_artifact(plan, checksum)?;
        }
        DeploymentKind::Standalone => {
            say!("📦 Copying to deployments directory...");
            local::copy_artifact(plan, checksum)?;

            say!("📦 Creating deployment marker...");
            local::write_dodeploy(plan)?;

            let spinner = create_spinner("Waiting for deployment...");
            let state = local::wait_for_marker(plan, MARKER_TIMEOUT, MARKER_POLL_INTERVAL).await;
            spinner.finish_and_clear();

            match state {
                MarkerState::Deployed => {
                    say!("{} {}.deployed found", status::SUCCESS, plan.artifact_name);
                }
                MarkerState::Failed => {
                    println!("{} Deployment failed - check server logs", status::ERROR);
                }
                MarkerState::Pending => {
                    say!(
                        "{} Still deploying (no marker after {}s) - check server logs",
                        status::INFO,
                        MARKER_TIMEOUT.as_secs()
                    );
                }
            }
        }
        DeploymentKind::Domain { server_group } => {
            say!("📦 Copying to domain deployments directory...");
            local::copy_artifact(plan, checksum)?;

            if no_cli {
                print_cli_commands(plan);
            } else {
                say!("📦 Undeploying existing deployment (if any)...");
                if let UndeployOutcome::Skipped(reason) = local::undeploy(plan).await {
                    tracing::info!("Undeploy skipped: {reason}");
                    say!("   (No existing deployment found or undeploy failed - continuing)");
                }

                say!("📦 Deploying to server group {server_group}...");
                local::deploy_via_cli(plan).await?;
            }
        }
    }

    say!("\n{} Deployed successfully", status::SUCCESS);
    Ok(())
}

fn print_cli_commands(plan: &DeploymentPlan) {
    let cli = plan.jboss_cli();
    println!("{} Skipping jboss-cli.sh. Run manually:", status::INFO);
    for args in [plan.undeploy_args(), plan.deploy_args()].into_iter().flatten() {
        let (connect, command) = args.split_at(args.len().saturating_sub(1));
        println!(
            "   {} {} \"{}\"",
            cli.display(),
            connect.join(" "),
            command.join(" ")
        );
    }
}

fn show_restart(plan: &DeploymentPlan, info: &ProjectInfo, verdict: &RestartVerdict) {
    say!();
    let headline = match verdict.severity {
        Severity::None => format!("{}  NO RESTART NEEDED", status::INFO),
        Severity::Recommended => format!("{}  RESTART RECOMMENDED", status::WARNING),
        Severity::Required => format!("{}  RESTART REQUIRED", status::WARNING),
    };
    say!("{headline}");
    say!("Reason: {}", verdict.reason);

    if verdict.needs_restart() {
        say!("\nRestart command:");
        let commands = restart_commands(
            &plan.wildfly_root,
            plan.mode,
            info.config.restart_alias.as_deref(),
        );
        for command in commands {
            say!("  {command}");
        }
    }
}

fn show_remote(plan: &DeploymentPlan, selection: ClientSelection<'_>) {
    match selection {
        ClientSelection::Selected(name, client) => {
            section("📝 REMOTE DEPLOYMENT GUIDE");
            for line in RemoteGuide::new(plan, name, client).lines() {
                say!("{line}");
            }
        }
        ClientSelection::Ambiguous(names) => {
            say!(
                "\n{} Remote instructions available for: {}",
                status::INFO,
                names.join(", ")
            );
            say!("   Re-run with --client <name> to print them.");
        }
        ClientSelection::NoClients => {
            tracing::debug!("No remote clients configured for {}", plan.project);
        }
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
