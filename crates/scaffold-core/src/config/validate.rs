//! Package-name validation for the app name
//!
//! The app name ends up as the `name` field of the generated manifest, so it
//! has to be a valid npm package name: non-empty, at most 214 characters,
//! lowercase, URL-safe, and not starting with `.` or `_`.

/// Maximum length npm accepts for a package name.
const MAX_NAME_LENGTH: usize = 214;

/// Names that collide with reserved filesystem entries.
const BLOCKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Validate an app name against package-name syntax rules.
///
/// Returns the first violation as a human-readable message, suitable for
/// re-prompting. `Ok(())` means the name is acceptable as-is.
pub fn validate_app_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "name cannot contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if name.starts_with('.') {
        return Err("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        return Err("name cannot start with an underscore".to_string());
    }
    if name != name.trim() {
        return Err("name cannot contain leading or trailing spaces".to_string());
    }
    if BLOCKLIST.contains(&name) {
        return Err(format!("{} is a reserved name", name));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err("name cannot contain capital letters".to_string());
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-_.~".contains(*c)))
    {
        return Err(format!(
            "name cannot contain non-URL-safe character '{}'",
            bad
        ));
    }

    Ok(())
}
