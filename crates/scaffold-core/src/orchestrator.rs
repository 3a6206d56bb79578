//! Pipeline orchestration
//!
//! Drives one scaffold run through its stages:
//! `RunningGenerator -> InstallingDependencies -> MutatingConfig ->
//! WritingTemplates -> Committing -> Done`. Any fatal error aborts the run
//! with the failing stage named and prior side effects left in place; an
//! error return from `run_pipeline` is the terminal failed state. The
//! commit stage alone is best-effort and lands in the report as a warning.

use crate::config::ResolvedConfig;
use crate::error::ScaffoldError;
use crate::manifest::{self, ManifestFile};
use crate::pipeline::{PipelineStep, ProcessDriver};
use crate::templates::{self, OverwritePolicy, WriteAction, WrittenFile, PLUGIN_PACKAGES};
use crate::vcs::GitFinalizer;
use anyhow::Result;
use colored::Colorize;

/// The stages of one scaffold run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingConfig,
    RunningGenerator,
    InstallingDependencies,
    MutatingConfig,
    WritingTemplates,
    Committing,
    Done,
}

impl Stage {
    /// Operator-facing banner shown when the stage begins.
    pub fn banner(&self) -> &'static str {
        match self {
            Stage::ResolvingConfig => "Let's create an itk.js app!",
            Stage::RunningGenerator => "Creating React app!",
            Stage::InstallingDependencies => "Setting up craco...",
            Stage::MutatingConfig => "Updating package.json...",
            Stage::WritingTemplates => "Writing app templates...",
            Stage::Committing => "Committing scaffold...",
            Stage::Done => "Enjoy building your itk.js app!",
        }
    }
}

/// The two external steps of a run, derived from the resolved config.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub bootstrap: PipelineStep,
    pub install: PipelineStep,
}

impl ScaffoldPlan {
    /// `npx create-react-app <destination>` followed by an
    /// `npm install` of the plugin set inside the destination.
    pub fn for_config(config: &ResolvedConfig) -> Self {
        let dest = config.destination.display().to_string();

        let bootstrap =
            PipelineStep::new("create-react-app", "npx", ["create-react-app".to_string(), dest]);

        let mut install_args = vec!["install", "--save", "--silent"];
        install_args.extend_from_slice(PLUGIN_PACKAGES);
        let install = PipelineStep::new("install plugins", "npm", install_args)
            .in_dir(&config.destination);

        Self { bootstrap, install }
    }
}

/// Outcome of a successful run: which template files were written (or
/// skipped, under `SkipIfExists`) and whether the final commit landed.
#[derive(Debug)]
pub struct PipelineReport {
    pub files: Vec<WrittenFile>,
    pub commit_error: Option<ScaffoldError>,
}

impl PipelineReport {
    pub fn committed(&self) -> bool {
        self.commit_error.is_none()
    }
}

fn announce(stage: Stage) {
    println!();
    println!("{}", stage.banner().blue().bold());
}

/// Run the whole pipeline against an already-resolved configuration.
///
/// Fatal errors propagate immediately; completed stages are not rolled
/// back. Re-running against a partially populated destination is the
/// recovery path.
pub async fn run_pipeline(
    config: &ResolvedConfig,
    plan: &ScaffoldPlan,
    driver: &ProcessDriver,
    policy: OverwritePolicy,
) -> Result<PipelineReport> {
    announce(Stage::RunningGenerator);
    driver.run(&plan.bootstrap).await?;

    announce(Stage::InstallingDependencies);
    driver.run(&plan.install).await?;

    announce(Stage::MutatingConfig);
    let mut manifest = ManifestFile::load(config.manifest_path())?;
    manifest::apply_scaffold_edits(&mut manifest, config);
    manifest.save()?;

    announce(Stage::WritingTemplates);
    let files = templates::materialize(config, policy)?;
    for file in &files {
        match file.action {
            WriteAction::Written => {
                println!("  {} {}", "wrote".green(), file.path.display());
            }
            WriteAction::Skipped => {
                println!(
                    "  {} {} (already exists)",
                    "skipped".yellow(),
                    file.path.display()
                );
            }
        }
    }

    announce(Stage::Committing);
    let commit_error = GitFinalizer::new(&config.destination).finalize().err();
    if let Some(err) = &commit_error {
        eprintln!("{} {}", "Warning:".yellow().bold(), err);
    }

    println!();
    println!("{}", Stage::Done.banner().green().bold());

    Ok(PipelineReport {
        files,
        commit_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Author;
    use std::path::Path;

    fn sample_config(dest: &Path) -> ResolvedConfig {
        ResolvedConfig {
            destination: dest.to_path_buf(),
            app_name: "demo".into(),
            description: "A demo".into(),
            author: Author::new("Ada Lovelace").with_email("ada@example.org"),
            github_user: "ada".into(),
            repo: "demo".into(),
            homepage: "https://github.com/ada/demo".into(),
        }
    }

    /// A stand-in plan whose bootstrap writes a minimal manifest the way
    /// the real generator would, and whose install step leaves a marker.
    fn fake_plan(dest: &Path) -> ScaffoldPlan {
        let bootstrap = PipelineStep::new(
            "create-react-app",
            "sh",
            [
                "-c",
                r#"printf '{\n  "name": "placeholder",\n  "scripts": {\n    "start": "react-scripts start"\n  }\n}\n' > package.json && printf '{}\n' > package-lock.json"#,
            ],
        )
        .in_dir(dest);

        let install = PipelineStep::new("install plugins", "sh", ["-c", "touch installed.marker"])
            .in_dir(dest);

        ScaffoldPlan { bootstrap, install }
    }

    #[test]
    fn test_plan_commands_for_config() {
        let dir = tempfile::tempdir().unwrap();
        let plan = ScaffoldPlan::for_config(&sample_config(dir.path()));

        assert_eq!(plan.bootstrap.program, "npx");
        assert_eq!(plan.bootstrap.args[0], "create-react-app");
        assert_eq!(plan.bootstrap.args[1], dir.path().display().to_string());

        assert_eq!(plan.install.program, "npm");
        assert_eq!(plan.install.cwd.as_deref(), Some(dir.path()));
        assert_eq!(plan.install.args[..3], ["install", "--save", "--silent"]);
        // Every plugin package is installed, in order.
        assert_eq!(&plan.install.args[3..], PLUGIN_PACKAGES);
    }

    #[tokio::test]
    async fn test_failed_bootstrap_stops_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());
        let mut plan = fake_plan(dir.path());
        plan.bootstrap = PipelineStep::new("create-react-app", "sh", ["-c", "exit 2"]);

        let err = run_pipeline(&config, &plan, &ProcessDriver::new(), OverwritePolicy::Overwrite)
            .await
            .unwrap_err();

        let scaffold_err = err.downcast_ref::<ScaffoldError>().unwrap();
        assert!(matches!(
            scaffold_err,
            ScaffoldError::ExternalProcessFailed {
                step: "create-react-app",
                code: 2
            }
        ));
        // No later stage ran.
        assert!(!dir.path().join("installed.marker").exists());
        assert!(!dir.path().join("craco.config.js").exists());
    }

    #[tokio::test]
    async fn test_failed_install_leaves_manifest_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());
        let mut plan = fake_plan(dir.path());
        plan.install = PipelineStep::new("install plugins", "sh", ["-c", "exit 1"]);

        run_pipeline(&config, &plan, &ProcessDriver::new(), OverwritePolicy::Overwrite)
            .await
            .unwrap_err();

        // The manifest is exactly as the bootstrapper wrote it.
        let manifest = ManifestFile::load(dir.path().join("package.json")).unwrap();
        assert_eq!(manifest.get("name").unwrap(), "placeholder");
        assert_eq!(manifest.get("scripts.start").unwrap(), "react-scripts start");
        assert!(!dir.path().join("craco.config.js").exists());
    }

    #[tokio::test]
    async fn test_full_run_mutates_manifest_and_writes_templates() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());
        let plan = fake_plan(dir.path());

        let report =
            run_pipeline(&config, &plan, &ProcessDriver::new(), OverwritePolicy::Overwrite)
                .await
                .unwrap();

        assert!(dir.path().join("installed.marker").exists());

        let manifest = ManifestFile::load(dir.path().join("package.json")).unwrap();
        assert_eq!(manifest.get("name").unwrap(), "demo");
        assert_eq!(manifest.get("scripts.start").unwrap(), "craco start");
        assert_eq!(manifest.get("scripts.build").unwrap(), "craco build");
        assert_eq!(manifest.get("scripts.test").unwrap(), "craco test");

        assert!(dir.path().join("craco.config.js").exists());
        assert!(dir.path().join("src/App.js").exists());

        // The destination is not a git repository, so the commit stage is
        // reported as a warning rather than failing the run.
        assert_eq!(report.files.len(), 2);
        assert!(!report.committed());
    }

    #[tokio::test]
    async fn test_missing_manifest_after_bootstrap_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());
        let mut plan = fake_plan(dir.path());
        // Bootstrap "succeeds" without producing a manifest.
        plan.bootstrap = PipelineStep::new("create-react-app", "sh", ["-c", "exit 0"]);

        let err = run_pipeline(&config, &plan, &ProcessDriver::new(), OverwritePolicy::Overwrite)
            .await
            .unwrap_err();
        let scaffold_err = err.downcast_ref::<ScaffoldError>().unwrap();
        assert!(matches!(scaffold_err, ScaffoldError::ConfigFileNotFound(_)));
    }
}
