//! Mocked login. Any well-formed email with a 6+ character password opens a
//! session; nothing is checked against stored credentials.

use crate::errors::AppError;
use crate::models::Session;
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

pub fn login(email: &str, password: &str) -> Result<Session, AppError> {
    let email = email.trim();
    if !EMAIL_PATTERN.is_match(email) {
        return Err(AppError::bad_request("Enter a valid email"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request("Password must be 6+ chars"));
    }
    Ok(Session {
        email: email.to_string(),
    })
}

pub fn require_session(user: Option<&Session>) -> Result<&Session, AppError> {
    user.ok_or_else(AppError::unauthorized)
}
