//! Command-line interface module
//!
//! This module handles argument parsing, prompts, and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;
pub mod prompt;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use commands::Commands;

/// jmw - Maven build and WildFly deployment helper
///
/// Builds the current Maven module, deploys it to the local WildFly, and
/// prints instructions for repeating the deployment on remote servers.
#[derive(Parser, Debug)]
#[command(name = "jmw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print only errors and explicitly requested output such as `--json`
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (overrides ./config.yaml and the user config)
    #[arg(long, global = true, env = "JMW_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(self.config.as_deref()).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
