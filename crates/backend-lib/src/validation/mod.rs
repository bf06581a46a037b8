// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request input validation.

use crate::auth::password::PasswordRequirements;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 30;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_CONTENT_LENGTH: usize = 2000;

// Regex patterns for validation
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for crate::error::AppError {
    fn from(err: ValidationError) -> Self {
        crate::error::AppError::InvalidInput(err.to_string())
    }
}

/// Validate a login handle (email)
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email must not be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Email is not a valid address".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a display username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::InvalidUsername(format!(
            "Username must be at least {MIN_USERNAME_LENGTH} characters"
        )));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::InvalidUsername(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::InvalidUsername(
            "Username must contain only alphanumeric characters, dots, dashes and underscores"
                .to_string(),
        ));
    }

    Ok(username)
}

/// Validate a password against the configured policy
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.len() < requirements.min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {} characters",
            requirements.min_length
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain an uppercase letter".to_string(),
        ));
    }

    if requirements.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain a lowercase letter".to_string(),
        ));
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain a digit".to_string(),
        ));
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain a special character".to_string(),
        ));
    }

    Ok(password)
}

/// Validate user-submitted text content (posts, comments)
pub fn validate_content(content: &str) -> ValidationResult<&str> {
    if content.trim().is_empty() {
        return Err(ValidationError::InvalidContent(
            "Content must not be empty".to_string(),
        ));
    }

    if content.len() > MAX_CONTENT_LENGTH {
        return Err(ValidationError::InvalidContent(format!(
            "Content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }

    Ok(content)
}
