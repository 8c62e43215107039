//! CLI argument validators
//!
//! Plain `fn(&str) -> Result<String>` validators that compose directly
//! with argument parsers such as clap's `value_parser`.

use std::collections::HashSet;

use crate::error::{Result, ToolbeltError};

/// Check whether a character is in the default safe set
/// (ASCII alphanumerics plus `-` and `_`)
pub fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

/// Validate that a string is non-empty after trimming whitespace
///
/// Returns the trimmed value.
pub fn nonempty_string(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolbeltError::InvalidArgument(
            "expected a non-empty string".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate that a string contains only default-safe characters
pub fn safechars_string(value: &str) -> Result<String> {
    match value.chars().find(|c| !is_safe_char(*c)) {
        Some(offender) => Err(ToolbeltError::InvalidArgument(format!(
            "unsafe character {offender:?} in {value:?}"
        ))),
        None => Ok(value.to_string()),
    }
}

/// Validate that a string contains only caller-allowed characters
pub fn safechars_string_with(value: &str, allowed_chars: &HashSet<char>) -> Result<String> {
    match value.chars().find(|c| !allowed_chars.contains(c)) {
        Some(offender) => Err(ToolbeltError::InvalidArgument(format!(
            "unsafe character {offender:?} in {value:?}"
        ))),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonempty_string_passes_through() {
        assert_eq!(nonempty_string("a").unwrap(), "a");
    }

    #[test]
    fn test_nonempty_string_trims_whitespace() {
        assert_eq!(nonempty_string(" a ").unwrap(), "a");
    }

    #[test]
    fn test_nonempty_string_rejects_empty() {
        assert!(matches!(
            nonempty_string(""),
            Err(ToolbeltError::InvalidArgument(_))
        ));
        assert!(matches!(
            nonempty_string("   "),
            Err(ToolbeltError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_safechars_default_safe() {
        assert_eq!(safechars_string("abc-DEF_123").unwrap(), "abc-DEF_123");
    }

    #[test]
    fn test_safechars_default_unsafe() {
        assert!(matches!(
            safechars_string("$"),
            Err(ToolbeltError::InvalidArgument(_))
        ));
        assert!(matches!(
            safechars_string("a b"),
            Err(ToolbeltError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_safechars_custom_allowed() {
        let allowed: HashSet<char> = ['a', 'b', 'c'].into_iter().collect();
        assert_eq!(safechars_string_with("a", &allowed).unwrap(), "a");
        assert!(matches!(
            safechars_string_with("d", &allowed),
            Err(ToolbeltError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_string_is_trivially_safe() {
        assert_eq!(safechars_string("").unwrap(), "");
    }
}
