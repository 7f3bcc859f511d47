//! Default configuration values

use std::time::Duration;

/// Name of the configuration file in the working and config directories
pub const LOCAL_CONFIG_FILE: &str = "config.yaml";

/// Configuration used when no file is found
pub const DEFAULT_CONFIG_YAML: &str = include_str!("default.yaml");

/// Maven executable
pub const MAVEN: &str = "mvn";

/// Maven goals run by `jmw build`
pub const MAVEN_GOALS: &[&str] = &["clean", "install"];

/// Maven build output directory
pub const TARGET_DIR: &str = "target";

/// Management controller used for domain deployments
pub const CONTROLLER: &str = "localhost";

/// Marker written to trigger a standalone deployment
pub const DODEPLOY_SUFFIX: &str = ".dodeploy";

/// Marker written by WildFly after a successful deployment
pub const DEPLOYED_SUFFIX: &str = ".deployed";

/// Marker written by WildFly after a failed deployment
pub const FAILED_SUFFIX: &str = ".failed";

/// Marker written by WildFly after the deployment was removed
pub const UNDEPLOYED_SUFFIX: &str = ".undeployed";

/// Total time to wait for a deployment marker
pub const MARKER_TIMEOUT: Duration = Duration::from_secs(2);

/// Interval between marker checks
pub const MARKER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Upload directory for remote domain deployments
pub const REMOTE_UPLOAD_DIR: &str = "/tmp";

/// Width of section separators
pub const SEPARATOR_WIDTH: usize = 50;
