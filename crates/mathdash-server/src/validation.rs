//! Boundary validation for client-supplied values.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

pub const USERNAME_MIN: usize = 2;
pub const USERNAME_MAX: usize = 20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("username must be between 2 and 20 characters")]
    Username,

    #[error("invalid email address")]
    Email,

    #[error("answer must be a finite number")]
    Answer,
}

/// Trim and length-check a username. Returns the trimmed form.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if (USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::Username)
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if email_regex().is_some_and(|re| re.is_match(trimmed)) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::Email)
    }
}

/// Accept a JSON number, or a string holding one. Anything non-finite is
/// rejected.
pub fn parse_answer(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::Answer)
}
