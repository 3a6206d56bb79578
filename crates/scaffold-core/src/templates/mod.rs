//! Template materialization
//!
//! Two write-once artifacts are rendered against the resolved configuration
//! and placed into the destination: the craco build configuration (ordered
//! plugin list) and the starter `src/App.js`. Rendering is pure: the same
//! configuration always produces the same bytes. Values substituted into
//! JavaScript are escaped so identity fields containing quotes or newlines
//! cannot break the generated source.

use crate::config::ResolvedConfig;
use crate::error::ScaffoldError;
use std::path::{Path, PathBuf};

/// Packages installed on top of the base project, in install order.
pub const PLUGIN_PACKAGES: &[&str] = &[
    "@craco/craco",
    "craco-itk",
    "itk",
    "craco-vtk",
    "vtk.js",
    "shader-loader",
    "worker-loader",
];

/// Craco plugins written into the build configuration. Order matters:
/// plugins wrap the build pipeline in sequence.
pub const CRACO_PLUGINS: &[CracoPlugin] = &[
    CracoPlugin {
        package: "craco-itk",
        constructor: "CracoItkPlugin",
    },
    CracoPlugin {
        package: "craco-vtk",
        constructor: "CracoVtkPlugin",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct CracoPlugin {
    pub package: &'static str,
    pub constructor: &'static str,
}

/// What to do when a template's target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Last pipeline run wins (the historical behavior).
    #[default]
    Overwrite,
    /// Leave existing files alone, e.g. when re-scaffolding over user edits.
    SkipIfExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Written,
    Skipped,
}

/// One materialized file and what happened to it, destination-relative.
#[derive(Debug, Clone)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub action: WriteAction,
}

const APP_TEMPLATE: &str = include_str!("assets/App.js");

/// Escape a value for insertion into JavaScript source: backslashes,
/// both quote styles, backticks, and line breaks.
pub fn escape_js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '`' => out.push_str("\\`"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Substitute every `{{field}}` placeholder with its configuration value.
pub fn render(template: &str, config: &ResolvedConfig) -> String {
    let bindings = [
        ("{{app_name}}", escape_js_string(&config.app_name)),
        ("{{description}}", escape_js_string(&config.description)),
        ("{{author}}", escape_js_string(&config.author.to_string())),
        ("{{homepage}}", escape_js_string(&config.homepage)),
        ("{{github_user}}", escape_js_string(&config.github_user)),
        ("{{repo}}", escape_js_string(&config.repo)),
    ];

    let mut out = template.to_string();
    for (placeholder, value) in bindings {
        out = out.replace(placeholder, &value);
    }
    out
}

/// Render the craco build configuration from the ordered plugin list.
pub fn craco_config(config: &ResolvedConfig) -> String {
    let mut out = format!(
        "// craco configuration for {}\n",
        escape_js_string(&config.app_name)
    );
    for plugin in CRACO_PLUGINS {
        out.push_str(&format!(
            "const {} = require(\"{}\")\n",
            plugin.constructor, plugin.package
        ));
    }
    out.push_str("\nmodule.exports = {\n  plugins: [\n");
    for (idx, plugin) in CRACO_PLUGINS.iter().enumerate() {
        out.push_str(&format!(
            "    {{\n      plugin: {}()\n    }}",
            plugin.constructor
        ));
        if idx + 1 < CRACO_PLUGINS.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("  ]\n}\n");
    out
}

/// Render the starter application source.
pub fn app_source(config: &ResolvedConfig) -> String {
    render(APP_TEMPLATE, config)
}

/// Write both templates into the destination, creating parent directories
/// as needed, honoring the overwrite policy per file.
pub fn materialize(
    config: &ResolvedConfig,
    policy: OverwritePolicy,
) -> Result<Vec<WrittenFile>, ScaffoldError> {
    let files = [
        (PathBuf::from("craco.config.js"), craco_config(config)),
        (PathBuf::from("src").join("App.js"), app_source(config)),
    ];

    let mut report = Vec::with_capacity(files.len());
    for (relative, body) in files {
        let action = write_file(&config.destination, &relative, &body, policy)?;
        report.push(WrittenFile {
            path: relative,
            action,
        });
    }
    Ok(report)
}

fn write_file(
    dest: &Path,
    relative: &Path,
    body: &str,
    policy: OverwritePolicy,
) -> Result<WriteAction, ScaffoldError> {
    let target = dest.join(relative);

    if policy == OverwritePolicy::SkipIfExists && target.exists() {
        return Ok(WriteAction::Skipped);
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ScaffoldError::TemplateWriteError {
            path: target.clone(),
            source,
        })?;
    }

    std::fs::write(&target, body).map_err(|source| ScaffoldError::TemplateWriteError {
        path: target.clone(),
        source,
    })?;

    Ok(WriteAction::Written)
}
