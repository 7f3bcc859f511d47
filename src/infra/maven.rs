//! Maven execution
//!
//! Runs `mvn` for a module and finds the artifact it produced.

use std::fs;
use std::path::{Path, PathBuf};

use super::process::run_inherited;
use crate::config::defaults::TARGET_DIR;
use crate::core::build::{pick_artifact, MavenInvocation};
use crate::error::BuildError;

/// Check that the Maven executable is on `PATH`
pub fn ensure_available(program: &str) -> Result<PathBuf, BuildError> {
    which::which(program).map_err(|_| BuildError::ToolNotFound {
        tool: program.to_string(),
    })
}

/// Run a Maven build with the terminal attached
pub async fn run(invocation: &MavenInvocation) -> Result<(), BuildError> {
    let program = ensure_available(&invocation.program)?;
    tracing::info!("Running {invocation} in {}", invocation.working_dir.display());

    let status = run_inherited(&program, &invocation.args, Some(&invocation.working_dir))
        .await
        .map_err(|e| BuildError::MavenFailed {
            status: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(BuildError::MavenFailed {
            status: status.to_string(),
        })
    }
}

/// Newest deployable artifact in `<module>/target`
pub fn find_artifact(module_dir: &Path) -> Result<PathBuf, BuildError> {
    let target = module_dir.join(TARGET_DIR);
    let no_artifact = || BuildError::NoArtifact { dir: target.clone() };

    let entries = fs::read_dir(&target).map_err(|_| no_artifact())?;
    let candidates = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|e| {
            let modified = e.metadata().and_then(|m| m.modified()).ok()?;
            Some((e.path(), modified))
        })
        .collect();

    pick_artifact(candidates).ok_or_else(no_artifact)
}
