//! Platform-specific directory management
//!
//! Provides the home directory used for `~` expansion and the user config
//! directory holding `config.yaml`.
//!
//! Environment variables can override default directories:
//! - `JMW_HOME` - Override home directory
//! - `JMW_CONFIG_DIR` - Override config directory

use std::env;
use std::path::PathBuf;

use crate::config::defaults::LOCAL_CONFIG_FILE;

/// Environment variable names for directory overrides
pub const ENV_HOME: &str = "JMW_HOME";
pub const ENV_CONFIG_DIR: &str = "JMW_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "jmw";

/// Directory provider for jmw
#[derive(Debug, Clone)]
pub struct JmwDirs {
    home_dir: PathBuf,
    config_dir: PathBuf,
}

impl JmwDirs {
    /// Create a new `JmwDirs` instance
    ///
    /// Checks environment variables first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        let home_dir = Self::resolve_home_dir();
        let config_dir = Self::resolve_config_dir(&home_dir);
        Self {
            home_dir,
            config_dir,
        }
    }

    /// Create an instance with fixed paths
    #[must_use]
    pub fn with_paths(home_dir: PathBuf, config_dir: PathBuf) -> Self {
        Self {
            home_dir,
            config_dir,
        }
    }

    /// Home directory used for `~` expansion
    #[must_use]
    pub fn home_dir(&self) -> PathBuf {
        self.home_dir.clone()
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/jmw` or `~/.config/jmw`
    /// - macOS: `~/Library/Application Support/jmw`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Path to the user `config.yaml`
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(LOCAL_CONFIG_FILE)
    }

    fn resolve_home_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_HOME) {
            return PathBuf::from(path);
        }

        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    fn resolve_config_dir(home: &std::path::Path) -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| home.join(".config").join(APP_NAME))
    }
}

impl Default for JmwDirs {
    fn default() -> Self {
        Self::new()
    }
}
