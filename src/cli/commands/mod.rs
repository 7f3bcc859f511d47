//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clients;
pub mod deploy;

use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the current Maven module and deploy its artifact
    ///
    /// Runs `mvn clean install` in the module containing the working
    /// directory. Reactor roots are only built.
    Build {
        /// Maven profile (defaults to the project's default_profile)
        profile: Option<String>,

        /// Client to print remote deployment instructions for
        #[arg(short, long)]
        client: Option<String>,

        /// Pass -DskipTests to Maven
        #[arg(long)]
        skip_tests: bool,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print jboss-cli.sh commands instead of running them
        #[arg(long)]
        no_cli: bool,
    },

    /// Deploy a JAR, WAR or EAR to the local WildFly
    ///
    /// Shows the plan, asks for confirmation, copies the artifact, and
    /// reports whether WildFly needs a restart.
    Deploy {
        /// Artifact to deploy
        artifact: PathBuf,

        /// Client to print remote deployment instructions for
        #[arg(short, long)]
        client: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print jboss-cli.sh commands instead of running them
        #[arg(long)]
        no_cli: bool,
    },

    /// List configured remote clients
    Clients {
        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, config_path: Option<&Path>) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        match self {
            Self::Build {
                profile,
                client,
                skip_tests,
                yes,
                no_cli,
            } => {
                let options = build::BuildOptions {
                    profile,
                    skip_tests,
                    deploy: deploy::DeployOptions { client, yes, no_cli },
                };
                build::execute(&current_dir, config_path, options).await
            }
            Self::Deploy {
                artifact,
                client,
                yes,
                no_cli,
            } => {
                let options = deploy::DeployOptions { client, yes, no_cli };
                deploy::execute(&current_dir, config_path, &artifact, &options).await
            }
            Self::Clients { json } => clients::execute(&current_dir, config_path, json),
        }
    }
}
