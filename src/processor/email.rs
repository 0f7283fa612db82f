//! Email address shape check.

use once_cell::sync::Lazy;
use regex::Regex;

/// Full-string pattern: local part, `@`, domain, `.`, alphabetic TLD of two or more letters.
const EMAIL_PATTERN: &str = r"\A[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\z";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Check whether the whole string looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
