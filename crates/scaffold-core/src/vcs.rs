//! Commit finalizer
//!
//! Stages the fixed set of scaffold artifacts and records one commit. This
//! whole step is best-effort: the orchestrator reports its failure as a
//! warning and the scaffold on disk stands either way.

use crate::error::ScaffoldError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The commit message recorded for every scaffold run.
pub const COMMIT_MESSAGE: &str = "Updates from Create ITK App";

/// Repository-relative paths staged for the scaffold commit.
pub const TRACKED_PATHS: &[&str] = &[
    "craco.config.js",
    "package.json",
    "package-lock.json",
    "src/App.js",
];

/// Thin wrapper over the `git` binary with the destination as work tree.
pub struct GitFinalizer {
    workdir: PathBuf,
}

impl GitFinalizer {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn git(&self, args: &[&str]) -> Result<(), ScaffoldError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| ScaffoldError::VersionControlError(format!("could not run git: {}", e)))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ScaffoldError::VersionControlError(format!(
                "git {} failed: {}",
                args.first().unwrap_or(&"?"),
                stderr.trim()
            )))
        }
    }

    /// Stage the given repository-relative paths.
    pub fn add(&self, paths: &[&str]) -> Result<(), ScaffoldError> {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.git(&args)
    }

    /// Record one commit with the given message.
    pub fn commit(&self, message: &str) -> Result<(), ScaffoldError> {
        self.git(&["commit", "-m", message])
    }

    /// Stage the known scaffold artifacts and commit them.
    pub fn finalize(&self) -> Result<(), ScaffoldError> {
        self.add(TRACKED_PATHS)?;
        self.commit(COMMIT_MESSAGE)
    }
}
