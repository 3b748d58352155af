//! Client-side form checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormError;
use crate::model::{SignInForm, SignUpForm};

/// Email addresses accepted by the registration form.
pub fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").unwrap()
    });
    &EMAIL_REGEX
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Checks run before a sign-up request is sent.
pub fn validate_sign_up(form: &SignUpForm) -> Result<(), FormError> {
    require(&form.username, "Username")?;
    require(&form.email, "Email")?;
    require(&form.password, "Password")?;

    if !is_valid_email(&form.email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

/// Checks run before a sign-in request is sent.
pub fn validate_sign_in(form: &SignInForm) -> Result<(), FormError> {
    require(&form.username, "Username")?;
    require(&form.password, "Password")
}

/// Parse a typed answer. `Ok(None)` means the input was blank.
pub fn parse_answer(input: &str) -> Result<Option<i64>, FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| FormError::NotANumber)
}
