//! Error taxonomy for the scaffolding pipeline
//!
//! Every failure the pipeline can surface is one of these variants. All of
//! them abort the run except `VersionControlError`, which the orchestrator
//! reports as a warning and carries in the final report.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Bad user input (e.g. an app name that is not a valid package name).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An external step exited non-zero (or was killed after a timeout).
    #[error("step '{step}' failed with exit code {code}")]
    ExternalProcessFailed { step: &'static str, code: i32 },

    /// An external step could not be started or awaited at all.
    #[error("could not run step '{step}': {source}")]
    ProcessLaunchFailed {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest not found at {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("could not parse manifest {path}: {reason}")]
    ConfigFileParseError { path: PathBuf, reason: String },

    #[error("could not write manifest {path}: {source}")]
    ConfigFileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write template {path}: {source}")]
    TemplateWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Staging or committing failed. Non-fatal: the scaffold on disk stands.
    #[error("version control: {0}")]
    VersionControlError(String),
}

impl ScaffoldError {
    /// Whether this error aborts the pipeline. Only the version-control
    /// finalizer is best-effort.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScaffoldError::VersionControlError(_))
    }
}
