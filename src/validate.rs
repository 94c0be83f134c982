use std::sync::OnceLock;

use regex::Regex;

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 4;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://\S+$").expect("valid url pattern"))
}

/// Extract a required request field, rejecting absent or blank values.
pub fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

pub fn email(value: &str) -> Result<(), AppError> {
    if email_re().is_match(value) {
        Ok(())
    } else {
        Err(AppError::Validation("email is invalid".to_string()))
    }
}

pub fn password(value: &str) -> Result<(), AppError> {
    if value.len() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )))
    }
}

pub fn avatar_url(value: &str) -> Result<(), AppError> {
    if url_re().is_match(value) {
        Ok(())
    } else {
        Err(AppError::Validation("avatar must be a valid url".to_string()))
    }
}
