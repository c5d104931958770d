//! Form input validation

use regex::Regex;
use std::sync::OnceLock;

/// Check an email address
///
/// Accepts a local part and a domain made of word characters joined by
/// optional single `.` or `-` separators, followed by at least one `.`-led
/// label of two or more characters.
///
/// # Example
///
/// ```
/// use app_core::validation::is_valid_email;
///
/// assert!(is_valid_email("ada.lovelace@orbit-lines.space"));
/// assert!(!is_valid_email("ada@localhost"));
/// ```
pub fn is_valid_email(s: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9_]+(?:[.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+(?:[.-]?[A-Za-z0-9_]+)*(?:\.[A-Za-z0-9_]{2,})+$",
        )
        .expect("email pattern is valid")
    });

    re.is_match(s)
}

/// Check that a required field was filled in
pub fn is_non_empty(s: &str) -> bool {
    !s.is_empty()
}
