//! Error types for jmw
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config from {origin}: {error}")]
    ParseError { origin: String, error: String },

    /// Project uses domain mode without a server group
    #[error("Project '{project}' uses domain mode but has no server_group")]
    MissingServerGroup { project: String },

    /// Restart pattern has neither or both of `regex` and `glob`
    #[error("Restart pattern #{index} must set exactly one of 'regex' or 'glob'")]
    AmbiguousPattern { index: usize },

    /// Restart pattern does not compile
    #[error("Invalid restart pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },

    /// No projects configured at all
    #[error("No projects configured")]
    NoProjects,
}

/// Project and module detection errors
#[derive(Error, Debug)]
pub enum DetectError {
    /// Working directory does not belong to any configured project
    #[error("No configured project matches '{cwd}'. Configured projects: {}", known.join(", "))]
    UnknownProject { cwd: PathBuf, known: Vec<String> },

    /// No pom.xml found at or above the working directory
    #[error("No pom.xml found in '{cwd}' or its parent directories")]
    NoPom { cwd: PathBuf },

    /// Failed to read a pom.xml
    #[error("Failed to read '{path}': {error}")]
    ReadPom { path: PathBuf, error: String },
}

/// Deployment errors
#[derive(Error, Debug)]
pub enum DeployError {
    /// Artifact file does not exist
    #[error("Artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// Artifact path has no usable file name
    #[error("Invalid artifact path: {path}")]
    InvalidArtifact { path: PathBuf },

    /// Target directory could not be created
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Marker file could not be written
    #[error("Failed to write deployment marker '{path}': {error}")]
    WriteMarker { path: PathBuf, error: String },

    /// Stale marker could not be removed
    #[error("Failed to remove stale deployment marker '{path}': {error}")]
    RemoveMarker { path: PathBuf, error: String },

    /// Copy into the WildFly tree failed
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Copied file differs from the source
    #[error("Checksum mismatch after copy to '{path}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Management CLI deploy failed
    #[error("jboss-cli deploy to server group '{server_group}' failed: {error}")]
    CliFailed { server_group: String, error: String },
}

/// Maven build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Maven is not installed
    #[error("Required tool '{tool}' is not installed or not in PATH")]
    ToolNotFound { tool: String },

    /// Profile not allowed for the project
    #[error("Profile '{profile}' is not valid for project '{project}'. Available: {}", available.join(", "))]
    UnknownProfile {
        project: String,
        profile: String,
        available: Vec<String>,
    },

    /// Maven exited with failure
    #[error("Maven build failed with {status}")]
    MavenFailed { status: String },

    /// Build finished but produced nothing deployable
    #[error("No deployable artifact (.war, .ear, .jar) found in '{dir}'")]
    NoArtifact { dir: PathBuf },
}

/// Remote guide errors
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Client name not configured for the project
    #[error("Unknown client '{name}' for project '{project}'. Known clients: {}", if known.is_empty() { "none".to_string() } else { known.join(", ") })]
    UnknownClient {
        project: String,
        name: String,
        known: Vec<String>,
    },
}

/// Top-level jmw error type
#[derive(Error, Debug)]
pub enum JmwError {
    /// Config error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Detection error
    #[error("Detection error: {0}")]
    Detect(#[from] DetectError),

    /// Deploy error
    #[error("Deploy error: {0}")]
    Deploy(#[from] DeployError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Remote error
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// IO error
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_client_lists_known_names() {
        let err = RemoteError::UnknownClient {
            project: "mto".to_string(),
            name: "acme".to_string(),
            known: vec!["alpha".to_string(), "beta".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown client 'acme' for project 'mto'. Known clients: alpha, beta"
        );
    }

    #[test]
    fn test_unknown_client_without_clients() {
        let err = RemoteError::UnknownClient {
            project: "mto".to_string(),
            name: "acme".to_string(),
            known: vec![],
        };
        assert!(err.to_string().ends_with("Known clients: none"));
    }

    #[test]
    fn test_top_level_wraps_domain_errors() {
        let err: JmwError = DeployError::ArtifactNotFound {
            path: PathBuf::from("/tmp/app.war"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Deploy error: Artifact not found: /tmp/app.war"
        );
    }
}
