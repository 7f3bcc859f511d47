//! Deployment configuration
//!
//! Reads the YAML configuration describing projects, their WildFly
//! instances, remote clients and restart rules.
//!
//! The file is looked up in priority order:
//! 1. An explicit path (`--config` or `JMW_CONFIG`)
//! 2. `config.yaml` in the working directory
//! 3. `config.yaml` in the user config directory
//! 4. The embedded default configuration
//!
//! A leading `~` in any string value is expanded to the home directory
//! before the document is deserialized.

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::restart::{RestartMatcher, Severity};
use crate::config::defaults::{DEFAULT_CONFIG_YAML, LOCAL_CONFIG_FILE};
use crate::error::ConfigError;
use crate::infra::dirs::JmwDirs;

/// Root configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Restart rules shared by all projects
    #[serde(default)]
    pub restart_rules: Option<RestartRules>,

    /// Configured projects keyed by name
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

/// One WildFly-backed project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Checkout root of the project sources
    #[serde(default)]
    pub source_root: Option<PathBuf>,

    /// Directory names that identify the project when `source_root` does not match
    #[serde(default)]
    pub path_contains: Vec<String>,

    /// Local WildFly installation
    pub wildfly_root: PathBuf,

    /// Operating topology
    #[serde(default)]
    pub mode: WildFlyMode,

    /// Server group for domain deployments
    #[serde(default)]
    pub server_group: Option<String>,

    /// Maven profile used when `build` is called without one
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Allowed Maven profiles (empty allows any)
    #[serde(default)]
    pub profiles: Vec<String>,

    /// Shell alias that restarts this WildFly
    #[serde(default)]
    pub restart_alias: Option<String>,

    /// Modules installed into the WildFly module repository
    #[serde(default)]
    pub global_modules: Vec<GlobalModule>,

    /// Project-specific restart rules, replacing the shared ones
    #[serde(default)]
    pub restart_rules: Option<RestartRules>,

    /// Remote hosts the artifact is shipped to by hand
    #[serde(default)]
    pub clients: BTreeMap<String, RemoteClient>,
}

/// WildFly operating mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WildFlyMode {
    /// File-drop hot deployment
    #[default]
    Standalone,
    /// Management CLI against server groups
    Domain,
}

impl fmt::Display for WildFlyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone => f.write_str("standalone"),
            Self::Domain => f.write_str("domain"),
        }
    }
}

/// A module deployed to the WildFly module repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalModule {
    /// Maven module (directory) name
    pub name: String,
    /// Target directory relative to the WildFly root
    pub path: PathBuf,
}

/// Remote WildFly host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteClient {
    /// SSH host
    pub host: String,
    /// SSH user
    pub user: String,
    /// WildFly root on the remote host
    pub wildfly_path: String,
    /// Command restarting WildFly on the remote host
    pub restart_cmd: String,
}

/// Restart classification rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestartRules {
    /// Global module deployments always require a restart
    #[serde(default)]
    pub global_module: bool,

    /// Patterns checked in order
    #[serde(default)]
    pub patterns: Vec<RestartPattern>,
}

/// A single restart pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestartPattern {
    /// Regular expression (unanchored)
    #[serde(default)]
    pub regex: Option<String>,
    /// Glob; without `/` it is matched against file names only
    #[serde(default)]
    pub glob: Option<String>,
    /// Severity reported on match
    pub severity: Severity,
    /// Reason reported on match
    pub reason: String,
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` or `JMW_CONFIG`
    Explicit(PathBuf),
    /// `./config.yaml`
    Local(PathBuf),
    /// User config directory
    User(PathBuf),
    /// Compiled into the binary
    Embedded,
}

impl ConfigSource {
    /// Pick the configuration file to read
    pub fn resolve(
        explicit: Option<&Path>,
        cwd: &Path,
        dirs: &JmwDirs,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            return Ok(Self::Explicit(path.to_path_buf()));
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Ok(Self::Local(local));
        }

        let user = dirs.config_path();
        if user.is_file() {
            return Ok(Self::User(user));
        }

        Ok(Self::Embedded)
    }

    /// Path of the file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Local(p) | Self::User(p) => Some(p),
            Self::Embedded => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str("embedded default"),
        }
    }
}

impl Config {
    /// Resolve, read and validate the configuration
    pub fn load(
        explicit: Option<&Path>,
        cwd: &Path,
        dirs: &JmwDirs,
    ) -> Result<(Self, ConfigSource), ConfigError> {
        let source = ConfigSource::resolve(explicit, cwd, dirs)?;
        let home = dirs.home_dir();
        tracing::debug!("Loading configuration from {source}");

        let config = match source.path() {
            Some(path) => Self::load_from_path(path, &home)?,
            None => Self::from_yaml(DEFAULT_CONFIG_YAML, "embedded default", &home)?,
        };
        Ok((config, source))
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path, home: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_yaml(&content, &path.display().to_string(), home)
    }

    /// Parse, expand `~` and validate a YAML document
    pub fn from_yaml(content: &str, origin: &str, home: &Path) -> Result<Self, ConfigError> {
        let parse_error = |e: serde_yaml_ng::Error| ConfigError::ParseError {
            origin: origin.to_string(),
            error: e.to_string(),
        };

        let raw: Value = serde_yaml_ng::from_str(content).map_err(parse_error)?;
        let config: Self = if raw.is_null() {
            Self::default()
        } else {
            serde_yaml_ng::from_value(expand_tilde(raw, home)).map_err(parse_error)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projects.is_empty() {
            return Err(ConfigError::NoProjects);
        }

        if let Some(rules) = &self.restart_rules {
            RestartMatcher::compile(rules)?;
        }

        for (name, project) in &self.projects {
            if project.mode == WildFlyMode::Domain && project.server_group.is_none() {
                return Err(ConfigError::MissingServerGroup {
                    project: name.clone(),
                });
            }
            if let Some(rules) = &project.restart_rules {
                RestartMatcher::compile(rules)?;
            }
        }
        Ok(())
    }

    /// Look up a project by name
    pub fn project(&self, name: &str) -> Option<&ProjectConfig> {
        self.projects.get(name)
    }

    /// Restart rules in effect for a project
    pub fn restart_rules_for<'a>(&'a self, project: &'a ProjectConfig) -> Option<&'a RestartRules> {
        project.restart_rules.as_ref().or(self.restart_rules.as_ref())
    }

    /// Compiled restart rules for a project
    pub fn restart_matcher_for(&self, project: &ProjectConfig) -> Result<RestartMatcher, ConfigError> {
        match self.restart_rules_for(project) {
            Some(rules) => RestartMatcher::compile(rules),
            None => Ok(RestartMatcher::default()),
        }
    }
}

impl ProjectConfig {
    /// Deployment directory of the local instance
    pub fn deployments_dir(&self) -> PathBuf {
        self.wildfly_root
            .join(self.mode.to_string())
            .join("deployments")
    }

    /// Management CLI script of the local instance
    pub fn jboss_cli(&self) -> PathBuf {
        self.wildfly_root.join("bin").join("jboss-cli.sh")
    }

    /// Global module entry for a module or artifact name
    pub fn global_module(&self, name: &str) -> Option<&GlobalModule> {
        self.global_modules.iter().find(|m| m.name == name)
    }
}

/// Expand a leading `~` in every string of a YAML tree
///
/// Only `~` and `~/...` are expanded; `~user` forms are left alone.
pub fn expand_tilde(value: Value, home: &Path) -> Value {
    match value {
        Value::String(s) => Value::String(expand_tilde_str(&s, home)),
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(|v| expand_tilde(v, home)).collect())
        }
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, expand_tilde(v, home)))
                .collect(),
        ),
        Value::Tagged(mut tagged) => {
            tagged.value = expand_tilde(tagged.value, home);
            Value::Tagged(tagged)
        }
        other => other,
    }
}

/// Expand a leading `~` in a single string
pub fn expand_tilde_str(s: &str, home: &Path) -> String {
    if s == "~" {
        home.display().to_string()
    } else if let Some(rest) = s.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        s.to_string()
    }
}
