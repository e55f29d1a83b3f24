//! Branch name validation.
//!
//! Names are used both as map keys and as user-facing arguments to
//! `checkout`/`merge`, so anything that would be ambiguous on a command line
//! is rejected:
//! - empty names
//! - whitespace and the characters `~ ^ : ? * [ \`
//! - `..`, `@{`, `//`
//! - a leading or trailing `.` or `/`, or a trailing `.lock`
//! - a path component starting with `.`

use crate::error::{RefError, Result};

const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

const FORBIDDEN_SEQUENCES: &[&str] = &["..", "@{", "//"];

fn invalid(name: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidBranchName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a branch name, returning `Ok(())` if valid.
///
/// ```
/// use sprig_refs::validate_branch_name;
///
/// assert!(validate_branch_name("main").is_ok());
/// assert!(validate_branch_name("feature/login").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "branch name must not be empty"));
    }

    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }

    if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|seq| name.contains(*seq)) {
        return Err(invalid(name, format!("must not contain {seq:?}")));
    }

    for edge in ['.', '/'] {
        if name.starts_with(edge) || name.ends_with(edge) {
            return Err(invalid(name, format!("must not start or end with {edge:?}")));
        }
    }

    if name.ends_with(".lock") {
        return Err(invalid(name, "must not end with '.lock'"));
    }

    if let Some(component) = name.split('/').find(|c| c.starts_with('.')) {
        return Err(invalid(
            name,
            format!("component must not start with '.': {component:?}"),
        ));
    }

    Ok(())
}
