//! Configuration resolution
//!
//! This module turns command-line flags plus (optionally) interactive
//! answers into one immutable `ResolvedConfig`. Precedence per field:
//! explicit flag > interactive answer > computed default.

pub mod author;
pub mod guess;
pub mod resolver;
pub mod validate;

pub use author::Author;
pub use resolver::{
    resolve, DefaultsSource, Question, QuestionSource, RawOptions, ResolvedConfig,
};
pub use validate::validate_app_name;

/// Convert a string to kebab-case: camelCase humps and any run of
/// non-alphanumeric characters become single `-` separators.
pub fn kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_lower = false;
    let mut pending_sep = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            let boundary = pending_sep || (ch.is_uppercase() && prev_lower);
            if boundary && !out.is_empty() {
                out.push('-');
            }
            for low in ch.to_lowercase() {
                out.push(low);
            }
            prev_lower = ch.is_lowercase() || ch.is_numeric();
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    out
}
