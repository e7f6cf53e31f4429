//! Staging directory lifecycle.
//!
//! The staging tree and the consumed input file are removed by
//! [`CleanupGuard`] when it goes out of scope, whichever way the run ends.

use crate::error::PipelineError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Creates `<root>/<name>` if needed and returns its path.
pub fn ensure_subdir(root: &Path, name: &str) -> std::io::Result<PathBuf> {
    let dir = root.join(name);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Removes a file or a directory tree. A path that is already gone counts as removed.
pub fn remove_path(path: &Path) -> std::io::Result<()> {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match result {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Removes a regular file. A path that is already gone counts as removed;
/// a directory is an error and is left alone.
pub fn remove_file_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Deletes the staging directory and the input file on drop.
pub struct CleanupGuard {
    staging_dir: PathBuf,
    input_path: PathBuf,
    done: bool,
}

impl CleanupGuard {
    /// Creates the staging directory and arms the guard.
    ///
    /// The guard is armed before the directory is created so a failed
    /// `create_dir_all` still consumes the input file.
    pub fn create(staging_dir: &Path, input_path: &Path) -> Result<Self, PipelineError> {
        let guard = CleanupGuard {
            staging_dir: staging_dir.to_path_buf(),
            input_path: input_path.to_path_buf(),
            done: false,
        };
        fs::create_dir_all(staging_dir).map_err(|e| PipelineError::io(staging_dir, e))?;
        Ok(guard)
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Runs the cleanup now and returns what could not be deleted.
    /// Later calls (including the one from `Drop`) do nothing.
    pub fn cleanup(&mut self) -> Vec<PipelineError> {
        if self.done {
            return Vec::new();
        }
        self.done = true;

        let mut failures = Vec::new();
        let removals = [
            (&self.staging_dir, remove_path(&self.staging_dir)),
            (&self.input_path, remove_file_if_present(&self.input_path)),
        ];
        for (path, removed) in removals {
            match removed {
                Ok(()) => tracing::debug!(path = %path.display(), "removed"),
                Err(source) => failures.push(PipelineError::CleanupFailed {
                    path: path.clone(),
                    source,
                }),
            }
        }
        failures
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        for failure in self.cleanup() {
            tracing::warn!("{:#}", anyhow::Error::from(failure));
            println!("Fail to delete temp files");
        }
    }
}
