//! External process steps and the driver that runs them
//!
//! The pipeline's external work (the project generator, the package
//! installer) is modelled as an ordered list of `PipelineStep`s. The driver
//! runs each step synchronously with the child's output streamed straight to
//! the operator's terminal, and turns a non-zero exit status into a typed
//! error. Crash-only policy: no retry, no rollback, no resume — effects of
//! already completed steps stay on disk.

use crate::error::ScaffoldError;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// One external command in the pipeline, in execution order.
#[derive(Debug, Clone)]
pub struct PipelineStep {
    /// Short name used in failure messages.
    pub name: &'static str,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; inherited from the parent when `None`.
    pub cwd: Option<PathBuf>,
}

impl PipelineStep {
    pub fn new(
        name: &'static str,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// The command line as the operator would type it, for status output.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs pipeline steps one at a time, stdout/stderr inherited.
///
/// A timeout, when set, bounds each step individually; a step that exceeds
/// it is killed and reported as a failure of that step.
#[derive(Debug, Default)]
pub struct ProcessDriver {
    step_timeout: Option<Duration>,
}

impl ProcessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(step_timeout: Duration) -> Self {
        Self {
            step_timeout: Some(step_timeout),
        }
    }

    /// Run one step to completion. Exit status 0 means success; anything
    /// else is `ExternalProcessFailed` naming the step.
    pub async fn run(&self, step: &PipelineStep) -> Result<(), ScaffoldError> {
        let mut command = Command::new(&step.program);
        command
            .args(&step.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(cwd) = &step.cwd {
            command.current_dir(cwd);
        }

        let mut child = command.spawn().map_err(|source| {
            ScaffoldError::ProcessLaunchFailed {
                step: step.name,
                source,
            }
        })?;

        let status = match self.step_timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(waited) => waited.map_err(|source| ScaffoldError::ProcessLaunchFailed {
                    step: step.name,
                    source,
                })?,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(ScaffoldError::ExternalProcessFailed {
                        step: step.name,
                        code: -1,
                    });
                }
            },
            None => child
                .wait()
                .await
                .map_err(|source| ScaffoldError::ProcessLaunchFailed {
                    step: step.name,
                    source,
                })?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::ExternalProcessFailed {
                step: step.name,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}
