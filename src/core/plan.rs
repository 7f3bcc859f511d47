//! Deployment planning
//!
//! Decides where an artifact goes in the local WildFly instance and which
//! commands that amounts to. Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use super::config::WildFlyMode;
use super::detector::ProjectInfo;
use crate::config::defaults::{
    CONTROLLER, DEPLOYED_SUFFIX, DODEPLOY_SUFFIX, FAILED_SUFFIX, UNDEPLOYED_SUFFIX,
};
use crate::error::DeployError;

/// Kind of local deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentKind {
    /// Copy into the WildFly module repository
    Global {
        /// Module path relative to the WildFly root
        module_path: PathBuf,
    },
    /// File-drop into `standalone/deployments`
    Standalone,
    /// Copy into `domain/deployments` and deploy through the management CLI
    Domain {
        /// Target server group
        server_group: String,
    },
}

/// A fully resolved local deployment
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    /// Project name
    pub project: String,
    /// Module name
    pub module: String,
    /// Artifact file name
    pub artifact_name: String,
    /// Absolute artifact path
    pub artifact_path: PathBuf,
    /// Local WildFly root
    pub wildfly_root: PathBuf,
    /// Project topology
    pub mode: WildFlyMode,
    /// Deployment kind
    pub kind: DeploymentKind,
    /// Directory the artifact is copied into
    pub target_dir: PathBuf,
}

impl DeploymentPlan {
    /// Plan the deployment of `artifact_path` for a detected project
    pub fn new(info: &ProjectInfo, artifact_path: &Path) -> Result<Self, DeployError> {
        let artifact_name = artifact_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DeployError::InvalidArtifact {
                path: artifact_path.to_path_buf(),
            })?
            .to_string();

        let project = &info.config;
        let (kind, target_dir) = match info.global_module(Some(&artifact_name)) {
            Some(module) => (
                DeploymentKind::Global {
                    module_path: module.path.clone(),
                },
                info.global_module_path(module),
            ),
            None => match (project.mode, &project.server_group) {
                (WildFlyMode::Domain, Some(group)) => (
                    DeploymentKind::Domain {
                        server_group: group.clone(),
                    },
                    project.deployments_dir(),
                ),
                _ => (DeploymentKind::Standalone, project.deployments_dir()),
            },
        };

        Ok(Self {
            project: info.name.clone(),
            module: info.module.name.clone(),
            artifact_name,
            artifact_path: artifact_path.to_path_buf(),
            wildfly_root: project.wildfly_root.clone(),
            mode: project.mode,
            kind,
            target_dir,
        })
    }

    /// Whether this is a global module deployment
    pub fn is_global(&self) -> bool {
        matches!(self.kind, DeploymentKind::Global { .. })
    }

    /// Where the artifact ends up
    pub fn target_path(&self) -> PathBuf {
        self.target_dir.join(&self.artifact_name)
    }

    /// `<target>.dodeploy`
    pub fn dodeploy_marker(&self) -> PathBuf {
        self.marker(DODEPLOY_SUFFIX)
    }

    /// `<target>.deployed`
    pub fn deployed_marker(&self) -> PathBuf {
        self.marker(DEPLOYED_SUFFIX)
    }

    /// `<target>.failed`
    pub fn failed_marker(&self) -> PathBuf {
        self.marker(FAILED_SUFFIX)
    }

    /// `<target>.undeployed`
    pub fn undeployed_marker(&self) -> PathBuf {
        self.marker(UNDEPLOYED_SUFFIX)
    }

    /// Result markers left behind by an earlier deployment of the same artifact
    pub fn result_markers(&self) -> [PathBuf; 3] {
        [
            self.deployed_marker(),
            self.failed_marker(),
            self.undeployed_marker(),
        ]
    }

    fn marker(&self, suffix: &str) -> PathBuf {
        self.target_dir
            .join(format!("{}{suffix}", self.artifact_name))
    }

    /// Local management CLI
    pub fn jboss_cli(&self) -> PathBuf {
        self.wildfly_root.join("bin").join("jboss-cli.sh")
    }

    /// Arguments for `jboss-cli.sh` undeploying the artifact
    pub fn undeploy_args(&self) -> Option<Vec<String>> {
        let DeploymentKind::Domain { server_group } = &self.kind else {
            return None;
        };
        Some(cli_args(&format!(
            "undeploy {} --server-groups={server_group}",
            self.artifact_name
        )))
    }

    /// Arguments for `jboss-cli.sh` deploying the copied artifact
    pub fn deploy_args(&self) -> Option<Vec<String>> {
        let DeploymentKind::Domain { server_group } = &self.kind else {
            return None;
        };
        Some(cli_args(&format!(
            "deploy {} --server-groups={server_group}",
            self.target_path().display()
        )))
    }

    /// Commands the deployment consists of, for display
    pub fn steps(&self) -> Vec<String> {
        let name = &self.artifact_name;
        let target = self.target_dir.display();
        let target_path = self.target_path();

        match &self.kind {
            DeploymentKind::Global { .. } => vec![format!("cp {name} {target}")],
            DeploymentKind::Standalone => vec![
                format!("cp {name} {target}"),
                format!("touch {target}/{name}{DODEPLOY_SUFFIX}"),
            ],
            DeploymentKind::Domain { server_group } => vec![
                format!("cp {name} {target}"),
                format!("jboss-cli.sh undeploy {name} --server-groups={server_group} (if exists)"),
                format!(
                    "jboss-cli.sh deploy {} --server-groups={server_group}",
                    target_path.display()
                ),
            ],
        }
    }

    /// Plan summary lines shown before confirmation
    pub fn summary(&self) -> Vec<String> {
        let kind = if self.is_global() { "global" } else { "normal" };
        let mut lines = vec![
            format!("Project: {}", self.project),
            format!("Module: {} ({kind})", self.module),
            format!("Source: {}", self.artifact_name),
        ];
        if let DeploymentKind::Domain { server_group } = &self.kind {
            lines.push(format!("Server group: {server_group}"));
        }
        lines.push(format!("Target: {}", self.target_dir.display()));
        lines
    }
}

fn cli_args(command: &str) -> Vec<String> {
    vec![
        "--connect".to_string(),
        format!("controller={CONTROLLER}"),
        command.to_string(),
    ]
}
