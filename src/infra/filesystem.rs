//! Filesystem operations
//!
//! Copies artifacts into the WildFly tree and manages deployment markers.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::DeployError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), DeployError> {
    std::fs::create_dir_all(path).map_err(|e| DeployError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// SHA-256 of a file as lowercase hex
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Copy `src` into `dest_dir`, creating the directory
///
/// The copy is verified against `expected_sha256`.
pub fn copy_verified(src: &Path, dest_dir: &Path, expected_sha256: &str) -> Result<PathBuf, DeployError> {
    let file_name = src.file_name().ok_or_else(|| DeployError::InvalidArtifact {
        path: src.to_path_buf(),
    })?;
    let dest = dest_dir.join(file_name);

    create_dir_all(dest_dir)?;
    std::fs::copy(src, &dest).map_err(|e| DeployError::CopyFailed {
        from: src.to_path_buf(),
        to: dest.clone(),
        error: e.to_string(),
    })?;

    let actual = sha256_file(&dest).map_err(|e| DeployError::CopyFailed {
        from: src.to_path_buf(),
        to: dest.clone(),
        error: e.to_string(),
    })?;
    if actual != expected_sha256 {
        return Err(DeployError::ChecksumMismatch {
            path: dest,
            expected: expected_sha256.to_string(),
            actual,
        });
    }

    tracing::debug!("Copied {} -> {}", src.display(), dest.display());
    Ok(dest)
}

/// Write an empty marker file
pub fn touch(path: &Path) -> Result<(), DeployError> {
    std::fs::write(path, b"").map_err(|e| DeployError::WriteMarker {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a marker file; a missing marker is not an error
pub fn remove_marker(path: &Path) -> Result<(), DeployError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed stale marker {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DeployError::RemoveMarker {
            path: path.to_path_buf(),
            error: e.to_string(),
        }),
    }
}
