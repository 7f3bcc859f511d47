//! Remote deployment guide
//!
//! Produces the `scp`/`ssh` commands a developer runs by hand to repeat a
//! local deployment on a client's server. The commands are only printed.

use std::collections::BTreeMap;

use super::config::{RemoteClient, WildFlyMode};
use super::plan::{DeploymentKind, DeploymentPlan};
use crate::config::defaults::{CONTROLLER, DODEPLOY_SUFFIX, REMOTE_UPLOAD_DIR};
use crate::error::RemoteError;

/// One numbered step of the guide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideStep {
    /// Step title
    pub title: String,
    /// Commands to run, in order
    pub commands: Vec<String>,
}

/// Instructions for one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteGuide {
    /// Client name
    pub client: String,
    /// `user@host`
    pub destination: String,
    /// Steps in order
    pub steps: Vec<GuideStep>,
}

impl RemoteGuide {
    /// Build the guide for a planned deployment
    pub fn new(plan: &DeploymentPlan, client_name: &str, client: &RemoteClient) -> Self {
        let dest = format!("{}@{}", client.user, client.host);
        let artifact = plan.artifact_path.display().to_string();
        let name = &plan.artifact_name;
        let ssh = |command: String| format!("ssh {dest} \"{command}\"");

        let mut steps = Vec::new();
        match &plan.kind {
            DeploymentKind::Global { module_path } => {
                let remote_dir = remote_join(&client.wildfly_path, &module_path.to_string_lossy());
                steps.push(step(
                    "Copy artifact",
                    vec![format!("scp {artifact} {dest}:{remote_dir}")],
                ));
            }
            DeploymentKind::Standalone => {
                let remote_dir = remote_join(&client.wildfly_path, "standalone/deployments");
                steps.push(step(
                    "Copy artifact",
                    vec![format!("scp {artifact} {dest}:{remote_dir}")],
                ));
                steps.push(step(
                    "Trigger deployment",
                    vec![ssh(format!("touch {remote_dir}/{name}{DODEPLOY_SUFFIX}"))],
                ));
            }
            DeploymentKind::Domain { server_group } => {
                let cli = remote_join(&client.wildfly_path, "bin/jboss-cli.sh");
                steps.push(step(
                    "Copy artifact to remote server",
                    vec![format!("scp {artifact} {dest}:{REMOTE_UPLOAD_DIR}/")],
                ));
                steps.push(step(
                    "Deploy via jboss-cli",
                    vec![
                        ssh(format!(
                            "{cli} --connect controller={CONTROLLER} 'undeploy {name} --server-groups={server_group}'"
                        )),
                        ssh(format!(
                            "{cli} --connect controller={CONTROLLER} 'deploy {REMOTE_UPLOAD_DIR}/{name} --server-groups={server_group}'"
                        )),
                    ],
                ));
            }
        }

        steps.push(step("Restart WildFly", vec![ssh(client.restart_cmd.clone())]));

        let log_dir = match plan.mode {
            WildFlyMode::Standalone => "standalone/log/server.log",
            WildFlyMode::Domain => "domain/log/server.log",
        };
        steps.push(step(
            "Verify deployment",
            vec![ssh(format!(
                "tail -f {}",
                remote_join(&client.wildfly_path, log_dir)
            ))],
        ));

        Self {
            client: client_name.to_string(),
            destination: dest,
            steps,
        }
    }

    /// All commands of the guide in order
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .flat_map(|s| s.commands.iter().map(String::as_str))
    }

    /// Render the guide as numbered text lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Client: {}", self.client), format!("Host: {}", self.destination)];
        for (i, step) in self.steps.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("{}. {}:", i + 1, step.title));
            lines.extend(step.commands.iter().map(|c| format!("   {c}")));
        }
        lines
    }
}

/// Outcome of choosing a client for the guide
#[derive(Debug, PartialEq, Eq)]
pub enum ClientSelection<'a> {
    /// A client to print instructions for
    Selected(&'a str, &'a RemoteClient),
    /// Several clients exist and none was requested
    Ambiguous(Vec<&'a str>),
    /// The project has no clients
    NoClients,
}

/// Pick the client named on the command line, or the only configured one
pub fn select_client<'a>(
    project: &str,
    clients: &'a BTreeMap<String, RemoteClient>,
    requested: Option<&str>,
) -> Result<ClientSelection<'a>, RemoteError> {
    if let Some(name) = requested {
        return clients
            .get_key_value(name)
            .map(|(n, c)| ClientSelection::Selected(n.as_str(), c))
            .ok_or_else(|| RemoteError::UnknownClient {
                project: project.to_string(),
                name: name.to_string(),
                known: clients.keys().cloned().collect(),
            });
    }

    let mut iter = clients.iter();
    Ok(match (iter.next(), iter.next()) {
        (None, _) => ClientSelection::NoClients,
        (Some((n, c)), None) => ClientSelection::Selected(n.as_str(), c),
        _ => ClientSelection::Ambiguous(clients.keys().map(String::as_str).collect()),
    })
}

/// Join remote (POSIX) path segments
pub fn remote_join(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{rest}")
    }
}

fn step(title: &str, commands: Vec<String>) -> GuideStep {
    GuideStep {
        title: title.to_string(),
        commands,
    }
}
