//! Field rules shared by the request validators.
//!
//! Each rule reports a single message, so validators call them in order and
//! return the first failure with `?`.

use std::sync::OnceLock;

use regex::Regex;

use crate::Error;

fn email_pattern() -> &'static Regex {
    static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is a valid regex")
    })
}

/// Check that `email` is present, non-blank and looks like `local@domain.tld`.
///
/// The local part and domain are limited to ASCII letters, digits and
/// `._%+-` (`.-` for the domain), and the top-level domain must be at least
/// two letters.
///
/// # Errors
///
/// Returns "Email is required" or "Invalid email format".
pub fn validate_email(email: Option<&str>) -> Result<&str, Error> {
    let email = required_text(email, "Email is required")?;

    if !email_pattern().is_match(email) {
        return Err(Error::Validation("Invalid email format"));
    }

    Ok(email)
}

/// Check that `value` is present and contains something other than whitespace.
///
/// The value is returned as given, untrimmed.
pub fn required_text<'a>(value: Option<&'a str>, message: &'static str) -> Result<&'a str, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::Validation(message)),
    }
}
