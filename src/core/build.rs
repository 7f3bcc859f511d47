//! Maven build planning
//!
//! Profile selection, the `mvn` command line, and picking the artifact the
//! build produced.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::config::ProjectConfig;
use crate::config::defaults::{MAVEN, MAVEN_GOALS};
use crate::error::BuildError;

/// Extensions WildFly can deploy
const DEPLOYABLE_EXTENSIONS: &[&str] = &["war", "ear", "jar"];

/// Classifier suffixes that never hold the deployable artifact
const SKIPPED_SUFFIXES: &[&str] = &["-sources", "-javadoc", "-tests", "-test-sources"];

/// A Maven invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenInvocation {
    /// Executable
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Directory to run in
    pub working_dir: PathBuf,
}

impl MavenInvocation {
    /// `mvn clean install [-P<profile>] [-DskipTests]`
    pub fn new(module_dir: &Path, profile: Option<&str>, skip_tests: bool) -> Self {
        let mut args: Vec<String> = MAVEN_GOALS.iter().map(|g| (*g).to_string()).collect();
        if let Some(profile) = profile {
            args.push(format!("-P{profile}"));
        }
        if skip_tests {
            args.push("-DskipTests".to_string());
        }

        Self {
            program: MAVEN.to_string(),
            args,
            working_dir: module_dir.to_path_buf(),
        }
    }

    /// Ask Maven to print errors only
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.args.push("-q".to_string());
        self
    }
}

impl fmt::Display for MavenInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Choose the Maven profile for a build
///
/// The requested profile wins over the project's default. When the project
/// lists allowed profiles, the choice must be one of them.
pub fn resolve_profile(
    project_name: &str,
    project: &ProjectConfig,
    requested: Option<&str>,
) -> Result<Option<String>, BuildError> {
    let profile = requested
        .map(str::to_string)
        .or_else(|| project.default_profile.clone());

    if let Some(p) = &profile {
        if !project.profiles.is_empty() && !project.profiles.contains(p) {
            return Err(BuildError::UnknownProfile {
                project: project_name.to_string(),
                profile: p.clone(),
                available: project.profiles.clone(),
            });
        }
    }
    Ok(profile)
}

/// Whether a file name looks like a deployable build artifact
pub fn is_deployable_artifact(file_name: &str) -> bool {
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    DEPLOYABLE_EXTENSIONS.contains(&ext)
        && !stem.starts_with("original-")
        && !SKIPPED_SUFFIXES.iter().any(|s| stem.ends_with(s))
}

/// Pick the newest deployable artifact among candidates
///
/// Ties on modification time prefer `.war` over `.ear` over `.jar`.
pub fn pick_artifact(candidates: Vec<(PathBuf, SystemTime)>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .filter(|(path, _)| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_deployable_artifact)
        })
        .max_by_key(|(path, modified)| (*modified, extension_rank(path)))
        .map(|(path, _)| path)
}

fn extension_rank(path: &Path) -> usize {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    DEPLOYABLE_EXTENSIONS
        .iter()
        .rev()
        .position(|e| *e == ext)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn project(default_profile: Option<&str>, profiles: &[&str]) -> ProjectConfig {
        ProjectConfig {
            source_root: None,
            path_contains: vec![],
            wildfly_root: PathBuf::from("/wf"),
            mode: Default::default(),
            server_group: None,
            default_profile: default_profile.map(String::from),
            profiles: profiles.iter().map(|p| (*p).to_string()).collect(),
            restart_alias: None,
            global_modules: vec![],
            restart_rules: None,
            clients: Default::default(),
        }
    }

    #[test]
    fn test_maven_command_line() {
        let mvn = MavenInvocation::new(Path::new("/src/m"), Some("TEST"), true);
        assert_eq!(mvn.to_string(), "mvn clean install -PTEST -DskipTests");
        assert_eq!(mvn.working_dir, PathBuf::from("/src/m"));

        let mvn = MavenInvocation::new(Path::new("/src/m"), None, false);
        assert_eq!(mvn.to_string(), "mvn clean install");

        let mvn = MavenInvocation::new(Path::new("/src/m"), None, true).quiet();
        assert_eq!(mvn.args, vec!["clean", "install", "-DskipTests", "-q"]);
    }

    #[test]
    fn test_profile_defaults_and_validation() {
        let p = project(Some("DEV"), &["DEV", "TEST"]);
        assert_eq!(resolve_profile("s", &p, None).unwrap(), Some("DEV".to_string()));
        assert_eq!(
            resolve_profile("s", &p, Some("TEST")).unwrap(),
            Some("TEST".to_string())
        );
        assert!(matches!(
            resolve_profile("s", &p, Some("PROD")),
            Err(BuildError::UnknownProfile { .. })
        ));

        let open = project(None, &[]);
        assert_eq!(resolve_profile("s", &open, None).unwrap(), None);
        assert_eq!(
            resolve_profile("s", &open, Some("ANY")).unwrap(),
            Some("ANY".to_string())
        );
    }

    #[test]
    fn test_deployable_artifact_names() {
        assert!(is_deployable_artifact("SinfoMto.war"));
        assert!(is_deployable_artifact("EJBPcs.jar"));
        assert!(is_deployable_artifact("app.ear"));
        assert!(!is_deployable_artifact("EJBPcs-sources.jar"));
        assert!(!is_deployable_artifact("EJBPcs-javadoc.jar"));
        assert!(!is_deployable_artifact("original-EJBPcs.jar"));
        assert!(!is_deployable_artifact("classes"));
        assert!(!is_deployable_artifact("maven-archiver.properties"));
    }

    #[test]
    fn test_pick_newest_artifact() {
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let t1 = t0 + Duration::from_secs(5);
        let picked = pick_artifact(vec![
            (PathBuf::from("target/old.war"), t0),
            (PathBuf::from("target/new.jar"), t1),
            (PathBuf::from("target/new-sources.jar"), t1 + Duration::from_secs(1)),
        ]);
        assert_eq!(picked, Some(PathBuf::from("target/new.jar")));
    }

    #[test]
    fn test_pick_prefers_war_on_tie() {
        let t = SystemTime::UNIX_EPOCH;
        let picked = pick_artifact(vec![
            (PathBuf::from("target/app.jar"), t),
            (PathBuf::from("target/app.war"), t),
        ]);
        assert_eq!(picked, Some(PathBuf::from("target/app.war")));
    }

    #[test]
    fn test_pick_nothing() {
        assert_eq!(pick_artifact(vec![]), None);
    }
}
