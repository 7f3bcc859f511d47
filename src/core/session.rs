//! Per-invocation context
//!
//! Bundles the loaded configuration with the working directory so commands
//! share one way of loading config and detecting the project.

use std::path::{Path, PathBuf};

use super::config::{Config, ConfigSource, ProjectConfig};
use super::detector::{self, ProjectInfo};
use super::restart::RestartMatcher;
use crate::error::JmwError;
use crate::infra::dirs::JmwDirs;

/// Loaded configuration and working directory
#[derive(Debug)]
pub struct Session {
    /// Parsed configuration
    pub config: Config,
    /// Where the configuration came from
    pub source: ConfigSource,
    /// Working directory
    pub cwd: PathBuf,
}

impl Session {
    /// Load configuration for a working directory
    pub fn open(cwd: &Path, explicit_config: Option<&Path>) -> Result<Self, JmwError> {
        Self::open_with_dirs(cwd, explicit_config, &JmwDirs::new())
    }

    /// Load configuration using explicit directories
    pub fn open_with_dirs(
        cwd: &Path,
        explicit_config: Option<&Path>,
        dirs: &JmwDirs,
    ) -> Result<Self, JmwError> {
        let (config, source) = Config::load(explicit_config, cwd, dirs)?;
        tracing::info!("Using configuration from {source}");
        Ok(Self {
            config,
            source,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Detect the project and module
    pub fn detect(&self, module_hint: Option<&Path>) -> Result<ProjectInfo, JmwError> {
        let info = detector::detect(&self.cwd, module_hint, &self.config)?;
        tracing::info!(
            "Detected project '{}', module '{}' at {}",
            info.name,
            info.module.name,
            info.module.path.display()
        );
        Ok(info)
    }

    /// Name of the project the working directory belongs to, if any
    pub fn current_project(&self) -> Option<&str> {
        detector::detect_project(&self.cwd, &self.config)
            .ok()
            .map(|(name, _)| name)
    }

    /// Restart rules in effect for a project
    pub fn restart_matcher(&self, project: &ProjectConfig) -> Result<RestartMatcher, JmwError> {
        Ok(self.config.restart_matcher_for(project)?)
    }
}
