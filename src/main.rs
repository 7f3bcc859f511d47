//! jmw CLI - Maven build and WildFly deployment helper
//!
//! Entry point for the jmw command-line application.

use anyhow::Result;
use clap::Parser;

use jmw::cli::output::{display_error, init_tracing, set_quiet};
use jmw::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);
    set_quiet(cli.quiet);
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        "Starting jmw"
    );

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
