//! Identity guessing from the local git configuration
//!
//! Prompt defaults for author name, email, and GitHub username come from
//! `git config --get`. Every probe is best-effort: a missing git binary or
//! an unset key just means no suggestion.

use std::process::Command;

/// Read a single value from git config, if git and the key are available.
fn git_config(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Guess the author's full name (`git config user.name`).
pub fn guess_author_name() -> Option<String> {
    git_config("user.name")
}

/// Guess the author's email address (`git config user.email`).
pub fn guess_email() -> Option<String> {
    git_config("user.email")
}

/// Guess a GitHub username: `git config github.user` when set, otherwise
/// the local part of the given email address.
pub fn guess_github_user(email: &str) -> Option<String> {
    if let Some(user) = git_config("github.user") {
        return Some(user);
    }

    let local = email.split('@').next().unwrap_or("");
    if local.is_empty() {
        None
    } else {
        Some(local.to_string())
    }
}
