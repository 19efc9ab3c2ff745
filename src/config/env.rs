//! # Environment Variable Utilities
//!
//! Small readers with type conversion and fallback defaults. Every reader
//! has a `*_from` twin that takes a provider closure so configuration code
//! can be tested without touching the process environment.
//!
//! # Examples
//! ```rust
//! use session_guard::config::env::{read_flag_from, read_u32_from};
//!
//! assert!(read_flag_from(|_| Some("yes".into()), "SQL_DEBUG", false));
//! assert_eq!(read_u32_from(|_| Some("12".into()), "JWT_TTL_HOURS", 48), 12);
//! ```

/// Reads a boolean flag from the process environment.
///
/// Truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
pub fn read_flag(name: &str, default: bool) -> bool {
    read_flag_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a boolean flag using a custom provider function.
pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => default,
    }
}

/// Reads a `u32`, falling back to `default` when missing or unparsable.
pub fn read_u32_from<F>(provider: F, name: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Reads a non-blank string, trimming surrounding whitespace.
///
/// Blank values are treated as missing.
pub fn read_string_from<F>(provider: F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_flag_true_variants() {
        for val in ["1", "true", "TRUE", "yes", "YES", "on", "On"] {
            let got = read_flag_from(|_| Some(val.into()), "X", false);
            assert!(got, "Expected {val:?} to be truthy");
        }
    }

    #[test]
    fn read_flag_false_variants() {
        for val in ["0", "false", "no", "off", "xyz", ""] {
            let got = read_flag_from(|_| Some(val.into()), "X", true);
            assert!(!got, "Expected {val:?} to be falsy");
        }
    }

    #[test]
    fn read_flag_default_when_missing() {
        assert!(read_flag_from(|_| None, "X", true));
        assert!(!read_flag_from(|_| None, "X", false));
    }

    #[test]
    fn read_flag_strips_quotes() {
        assert!(read_flag_from(|_| Some("\"true\"".into()), "X", false));
        assert!(read_flag_from(|_| Some("'yes'".into()), "X", false));
    }

    #[test]
    fn read_u32_valid_invalid_or_missing() {
        assert_eq!(read_u32_from(|_| Some(" 42 ".into()), "N", 10), 42);
        assert_eq!(read_u32_from(|_| Some("not_a_number".into()), "N", 99), 99);
        assert_eq!(read_u32_from(|_| Some("-1".into()), "N", 5), 5);
        assert_eq!(read_u32_from(|_| None, "N", 77), 77);
    }

    #[test]
    fn read_string_treats_blank_as_missing() {
        assert_eq!(
            read_string_from(|_| Some("  token  ".into()), "S"),
            Some("token".to_string())
        );
        assert_eq!(read_string_from(|_| Some("   ".into()), "S"), None);
        assert_eq!(read_string_from(|_| None, "S"), None);
    }
}
