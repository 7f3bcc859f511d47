//! Clients command implementation
//!
//! Implements `jmw clients`: lists the remote hosts configured per project.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::output::{say, section};
use crate::core::config::Config;
use crate::core::session::Session;

/// One client in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientEntry {
    /// Client name
    pub name: String,
    /// SSH host
    pub host: String,
    /// SSH user
    pub user: String,
    /// Remote WildFly root
    pub wildfly_path: String,
    /// Remote restart command
    pub restart_cmd: String,
}

/// Clients of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectClients {
    /// Project name
    pub project: String,
    /// Whether the working directory belongs to this project
    pub current: bool,
    /// Configured clients, sorted by name
    pub clients: Vec<ClientEntry>,
}

/// Collect clients of every project
pub fn collect(config: &Config, current: Option<&str>) -> Vec<ProjectClients> {
    config
        .projects
        .iter()
        .map(|(name, project)| ProjectClients {
            project: name.clone(),
            current: current == Some(name.as_str()),
            clients: project
                .clients
                .iter()
                .map(|(client, c)| ClientEntry {
                    name: client.clone(),
                    host: c.host.clone(),
                    user: c.user.clone(),
                    wildfly_path: c.wildfly_path.clone(),
                    restart_cmd: c.restart_cmd.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Execute the clients command
pub fn execute(cwd: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let session = Session::open(cwd, config_path).context("Failed to load configuration")?;
    let listing = collect(&session.config, session.current_project());

    if json {
        let out = serde_json::to_string_pretty(&listing).context("Failed to serialize clients")?;
        println!("{out}");
        return Ok(());
    }

    section("🌐 REMOTE CLIENTS");
    for project in &listing {
        let marker = if project.current { " (current)" } else { "" };
        say!("\n{}{marker}", project.project);
        if project.clients.is_empty() {
            say!("  (no clients)");
        }
        for client in &project.clients {
            say!(
                "  {}: {}@{}:{}",
                client.name, client.user, client.host, client.wildfly_path
            );
            say!("    restart: {}", client.restart_cmd);
        }
    }
    Ok(())
}
