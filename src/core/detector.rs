//! Project and module detection
//!
//! Works out which configured project the working directory belongs to and
//! which Maven module is being deployed.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::config::{Config, GlobalModule, ProjectConfig};
use crate::error::DetectError;

/// Maven project descriptor
pub const POM_FILE: &str = "pom.xml";

/// Detected project and module
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    /// Project name from the configuration
    pub name: String,
    /// Project configuration
    pub config: ProjectConfig,
    /// Detected module
    pub module: ModuleInfo,
}

/// A Maven module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module name (directory name)
    pub name: String,
    /// Directory containing `pom.xml`
    pub path: PathBuf,
    /// Whether the pom aggregates other modules
    pub is_reactor_root: bool,
}

impl ProjectInfo {
    /// Global module entry for this module or artifact, if any
    ///
    /// The artifact file stem is checked too so that artifacts deployed
    /// from another directory are still recognised.
    pub fn global_module(&self, artifact_name: Option<&str>) -> Option<&GlobalModule> {
        self.config.global_module(&self.module.name).or_else(|| {
            let stem = artifact_name
                .and_then(|n| Path::new(n).file_stem())
                .and_then(|s| s.to_str())?;
            self.config.global_module(stem)
        })
    }

    /// Target directory for a global module
    pub fn global_module_path(&self, module: &GlobalModule) -> PathBuf {
        self.config.wildfly_root.join(&module.path)
    }
}

/// Find the configured project for a directory
///
/// A project whose `source_root` contains `cwd` wins, the deepest root first.
/// Otherwise the first project (by name) with a `path_contains` keyword equal
/// to one of the path components is used.
pub fn detect_project<'a>(
    cwd: &Path,
    config: &'a Config,
) -> Result<(&'a str, &'a ProjectConfig), DetectError> {
    let by_root = config
        .projects
        .iter()
        .filter_map(|(name, project)| {
            let root = project.source_root.as_ref()?;
            cwd.starts_with(root)
                .then(|| (root.components().count(), name, project))
        })
        .max_by_key(|(depth, _, _)| *depth);

    if let Some((_, name, project)) = by_root {
        tracing::debug!("Project '{name}' matched by source root");
        return Ok((name.as_str(), project));
    }

    let components: Vec<String> = cwd
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(str::to_lowercase),
            _ => None,
        })
        .collect();

    config
        .projects
        .iter()
        .find(|(_, project)| {
            project
                .path_contains
                .iter()
                .any(|keyword| components.contains(&keyword.to_lowercase()))
        })
        .map(|(name, project)| {
            tracing::debug!("Project '{name}' matched by path keyword");
            (name.as_str(), project)
        })
        .ok_or_else(|| DetectError::UnknownProject {
            cwd: cwd.to_path_buf(),
            known: config.projects.keys().cloned().collect(),
        })
}

/// Find the Maven module containing `start`
///
/// Walks up to the nearest directory with a `pom.xml`, never above
/// `boundary` when one is given.
pub fn detect_module(start: &Path, boundary: Option<&Path>) -> Result<ModuleInfo, DetectError> {
    for dir in start.ancestors() {
        if let Some(boundary) = boundary {
            if !dir.starts_with(boundary) {
                break;
            }
        }

        let pom = dir.join(POM_FILE);
        if pom.is_file() {
            let content = fs::read_to_string(&pom).map_err(|e| DetectError::ReadPom {
                path: pom.clone(),
                error: e.to_string(),
            })?;

            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            return Ok(ModuleInfo {
                name,
                path: dir.to_path_buf(),
                is_reactor_root: declares_modules(&content),
            });
        }
    }

    Err(DetectError::NoPom {
        cwd: start.to_path_buf(),
    })
}

/// Detect project and module
///
/// `module_hint` is where module detection starts (the artifact's
/// directory for `deploy`); `cwd` is used when the hint has no pom.
/// With a `source_root`, the hint never reaches a pom outside it.
pub fn detect(
    cwd: &Path,
    module_hint: Option<&Path>,
    config: &Config,
) -> Result<ProjectInfo, DetectError> {
    let (name, project) = detect_project(cwd, config)?;
    let source_root = project.source_root.as_deref();
    let boundary = source_root.filter(|root| cwd.starts_with(root));

    let module = match module_hint {
        Some(hint) => {
            detect_module(hint, source_root).or_else(|_| detect_module(cwd, boundary))?
        }
        None => detect_module(cwd, boundary)?,
    };

    Ok(ProjectInfo {
        name: name.to_string(),
        config: project.clone(),
        module,
    })
}

/// Whether a pom aggregates submodules
pub fn declares_modules(pom: &str) -> bool {
    pom.contains("<modules>")
}
