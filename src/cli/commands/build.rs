//! Build command implementation
//!
//! Implements `jmw build`: runs Maven for the current module and deploys the
//! artifact it produced.

use anyhow::{Context, Result};
use std::path::Path;

use super::deploy::{deploy_artifact, DeployOptions};
use crate::cli::output::{is_quiet, say, section, status};
use crate::core::build::{resolve_profile, MavenInvocation};
use crate::core::remote::select_client;
use crate::core::session::Session;
use crate::infra::maven;

/// Build options
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Maven profile (falls back to the project's default)
    pub profile: Option<String>,
    /// Pass `-DskipTests`
    pub skip_tests: bool,
    /// Deployment options for the produced artifact
    pub deploy: DeployOptions,
}

/// Execute the build command
pub async fn execute(cwd: &Path, config_path: Option<&Path>, options: BuildOptions) -> Result<()> {
    let session = Session::open(cwd, config_path).context("Failed to load configuration")?;
    let info = session.detect(None).context("Failed to detect project")?;

    let profile = resolve_profile(&info.name, &info.config, options.profile.as_deref())?;
    select_client(&info.name, &info.config.clients, options.deploy.client.as_deref())?;
    let mut invocation = MavenInvocation::new(&info.module.path, profile.as_deref(), options.skip_tests);
    if is_quiet() {
        invocation = invocation.quiet();
    }

    section("🔨 MAVEN BUILD");
    say!("Project: {}", info.name);
    say!("Module: {}", info.module.name);
    if let Some(profile) = &profile {
        say!("Profile: {profile}");
    }
    say!("Command: {invocation}");
    say!();

    maven::run(&invocation).await?;
    say!("\n{} Build finished", status::SUCCESS);

    if info.module.is_reactor_root {
        say!(
            "{} {} aggregates other modules; run `jmw build` inside a module to deploy it.",
            status::INFO,
            info.module.name
        );
        return Ok(());
    }

    let artifact = maven::find_artifact(&info.module.path)?;
    tracing::info!("Built artifact: {}", artifact.display());

    deploy_artifact(&session, &info, &artifact, &options.deploy).await
}
