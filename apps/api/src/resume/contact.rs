//! Contact-field extraction — the first email address and phone number in a document.
//!
//! Matching is deliberately loose. The phone pattern accepts any run of nine or
//! more digits, spaces and hyphens that starts and ends with a digit, so dates and
//! ID numbers can match. Callers treat the result as a hint, not a validated value.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s-]{8,}\d").expect("valid phone regex"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Returns the leftmost email and phone matches in `text`. Absence is `None`, never an error.
pub fn extract_contact_fields(text: &str) -> ContactFields {
    ContactFields {
        email: first_match(&EMAIL_RE, text),
        phone: first_match(&PHONE_RE, text),
    }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}
