//! Scaffold Core - library behind the `create-itk-app` CLI
//!
//! Scaffolds an itk.js/vtk.js React application: it runs
//! `create-react-app` against a destination directory, installs the craco
//! plugin stack on top, rewrites the generated `package.json` in place,
//! materializes a build configuration and a starter `src/App.js`, and
//! finishes with a best-effort git commit of the modifications.
//!
//! # Architecture
//!
//! Data flows strictly one way through the components:
//!
//! - **config** - merges flags, interactive answers, and derived defaults
//!   into one immutable [`ResolvedConfig`]
//! - **pipeline** - runs the external generator/installer steps, aborting
//!   on the first non-zero exit
//! - **manifest** - applies the fixed mutation set to `package.json`
//! - **templates** - renders and writes the craco config and starter app
//! - **vcs** - stages the known artifacts and records one commit
//! - **orchestrator** - sequences the above and decides continue-vs-abort
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::config::{resolve, DefaultsSource, RawOptions};
//! use scaffold_core::orchestrator::{run_pipeline, ScaffoldPlan};
//! use scaffold_core::pipeline::ProcessDriver;
//! use scaffold_core::templates::OverwritePolicy;
//!
//! let options = RawOptions::new("/tmp/my-app");
//! let config = resolve(&options, &mut DefaultsSource)?;
//! let plan = ScaffoldPlan::for_config(&config);
//! let report = run_pipeline(&config, &plan, &ProcessDriver::new(),
//!     OverwritePolicy::Overwrite).await?;
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod pipeline;
pub mod templates;
pub mod vcs;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{resolve, Author, DefaultsSource, RawOptions, ResolvedConfig};
pub use error::ScaffoldError;
pub use orchestrator::{run_pipeline, PipelineReport, ScaffoldPlan, Stage};
pub use pipeline::{PipelineStep, ProcessDriver};
pub use templates::{OverwritePolicy, WrittenFile};

#[cfg(feature = "tui")]
pub use tui::run;
