//! Flag / prompt / default resolution
//!
//! `resolve` is the single place where precedence is decided: an explicit
//! flag always wins over an interactive answer, and an interactive answer
//! always wins over a computed default. Fields resolve in dependency order:
//! app name, description, author name, and email have no dependencies; the
//! GitHub user default reads the email; the repository default reads the app
//! name; the homepage default reads the GitHub user and repository.

use crate::config::author::Author;
use crate::config::{guess, kebab_case, validate::validate_app_name};
use crate::error::ScaffoldError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use url::Url;

/// Default description used when neither flag nor answer supplies one.
pub const DEFAULT_DESCRIPTION: &str = "An Insight Toolkit (ITK) app";

/// Command-line flags, one `Option` per field. `None` means "ask".
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    /// Absolute destination directory for the scaffold.
    pub destination: PathBuf,
    pub app_name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
    pub github_user: Option<String>,
    pub repo: Option<String>,
}

impl RawOptions {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }
}

/// One interactive question: prompt text, computed default, and an optional
/// validator used by interactive sources to re-ask on bad input.
pub struct Question {
    pub name: &'static str,
    pub prompt: &'static str,
    pub default: String,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

/// Where answers for unset flags come from. The TUI implements this with
/// cliclack prompts; `DefaultsSource` implements the non-interactive path.
pub trait QuestionSource {
    fn ask(&mut self, question: &Question) -> Result<String>;
}

/// Accepts every computed default without asking (`--yes` mode).
pub struct DefaultsSource;

impl QuestionSource for DefaultsSource {
    fn ask(&mut self, question: &Question) -> Result<String> {
        Ok(question.default.clone())
    }
}

/// Fully resolved configuration. Immutable once produced; every downstream
/// component receives it by reference and nothing is asked later.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub destination: PathBuf,
    pub app_name: String,
    pub description: String,
    pub author: Author,
    pub github_user: String,
    pub repo: String,
    pub homepage: String,
}

impl ResolvedConfig {
    /// Path of the generated project's manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.destination.join("package.json")
    }

    /// Clone URL written into the manifest's `repository.url` field.
    pub fn repository_url(&self) -> String {
        format!(
            "git+https://github.com/{}/{}.git",
            self.github_user, self.repo
        )
    }
}

/// Resolve all fields into one `ResolvedConfig`.
///
/// An app name supplied via flag that fails package-name validation aborts
/// immediately with `InvalidConfiguration`; interactive sources re-ask via
/// the question's validator instead.
pub fn resolve(options: &RawOptions, source: &mut dyn QuestionSource) -> Result<ResolvedConfig> {
    let app_name = match &options.app_name {
        Some(name) => {
            check_app_name(name)?;
            name.clone()
        }
        None => {
            let answer = source.ask(&Question {
                name: "appName",
                prompt: "App name:",
                default: default_app_name(&options.destination),
                validator: Some(validate_app_name),
            })?;
            // Interactive sources already validated; defaults may not be.
            check_app_name(&answer)?;
            answer
        }
    };

    let description = resolve_field(&options.description, source, "desc", "Description of app:", || {
        DEFAULT_DESCRIPTION.to_string()
    })?;

    let author_name = resolve_field(&options.author, source, "author", "Author's full name:", || {
        guess::guess_author_name().unwrap_or_default()
    })?;

    let email = resolve_field(&options.email, source, "email", "Author's email address:", || {
        guess::guess_email().unwrap_or_default()
    })?;

    let github_user = resolve_field(&options.github_user, source, "user", "GitHub user or org name:", || {
        guess::guess_github_user(&email).unwrap_or_default()
    })?;

    let repo = resolve_field(&options.repo, source, "repo", "Repository name:", || {
        app_name.clone()
    })?;

    let homepage = resolve_field(&options.homepage, source, "homepage", "Homepage:", || {
        default_homepage(&github_user, &repo)
    })?;

    Ok(ResolvedConfig {
        destination: options.destination.clone(),
        app_name,
        description,
        author: Author::new(author_name).with_email(email),
        github_user,
        repo,
        homepage,
    })
}

fn check_app_name(name: &str) -> Result<(), ScaffoldError> {
    validate_app_name(name).map_err(|reason| {
        ScaffoldError::InvalidConfiguration(format!("app name '{}': {}", name, reason))
    })
}

fn resolve_field(
    flag: &Option<String>,
    source: &mut dyn QuestionSource,
    name: &'static str,
    prompt: &'static str,
    default: impl FnOnce() -> String,
) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value.clone());
    }

    source.ask(&Question {
        name,
        prompt,
        default: default(),
        validator: None,
    })
}

fn default_app_name(destination: &Path) -> String {
    let basename = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    kebab_case(&basename)
}

fn default_homepage(user: &str, repo: &str) -> String {
    let raw = format!("https://github.com/{}/{}", user, repo);
    Url::parse(&raw).map(String::from).unwrap_or(raw)
}
