//! Changed file discovery
//!
//! Asks git which files of a module changed. Without git, every source file
//! of the module is reported.

use std::path::Path;
use walkdir::WalkDir;

use super::process::run_captured;
use crate::core::changes::{is_build_output, parse_porcelain, relative_to_module};

/// Files of a module that restart rules are matched against
///
/// Paths are relative to `module_dir` and use `/` separators.
pub async fn changed_files(module_dir: &Path) -> Vec<String> {
    match git_changes(module_dir).await {
        Some(files) => {
            tracing::debug!("git reports {} changed files", files.len());
            files
        }
        None => {
            tracing::debug!("git unavailable, scanning {}", module_dir.display());
            module_files(module_dir)
        }
    }
}

async fn git_changes(module_dir: &Path) -> Option<Vec<String>> {
    let git = Path::new("git");

    let prefix = run_captured(git, ["rev-parse", "--show-prefix"], Some(module_dir))
        .await
        .ok()
        .filter(|out| out.status.success())?;

    let status = run_captured(
        git,
        ["status", "--porcelain", "--untracked-files=all", "--", "."],
        Some(module_dir),
    )
        .await
        .ok()
        .filter(|out| out.status.success())?;

    Some(relative_to_module(
        parse_porcelain(&status.stdout),
        &prefix.stdout,
    ))
}

/// All files below a module, skipping build output
pub fn module_files(module_dir: &Path) -> Vec<String> {
    WalkDir::new(module_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(module_dir).ok()?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            (!is_build_output(&relative)).then_some(relative)
        })
        .collect()
}
