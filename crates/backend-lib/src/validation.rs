// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request payload validation.

use crate::error::AppError;
use axelsub_common::{CreateAnimeRequest, CreateCommentRequest, LoginRequest, RegisterRequest};
use regex::Regex;
use std::sync::LazyLock;

// Common validation constants
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 30;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_TITLE_LENGTH: usize = 200;
const MAX_COMMENT_LENGTH: usize = 2000;

// Regex patterns for validation
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

fn invalid(field: &str, message: impl Into<String>) -> AppError {
    AppError::Validation {
        message: message.into(),
        field: Some(field.to_string()),
    }
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(invalid(
            "username",
            format!("Username must be at least {MIN_USERNAME_LENGTH} characters"),
        ));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(invalid(
            "username",
            format!("Username cannot exceed {MAX_USERNAME_LENGTH} characters"),
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(invalid(
            "username",
            "Username must contain only letters, digits and underscores",
        ));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        return Err(invalid("email", "Email address cannot be empty"));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(invalid(
            "email",
            format!("Email address cannot exceed {MAX_EMAIL_LENGTH} characters"),
        ));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(invalid("email", "Invalid email address format"));
    }

    Ok(())
}

/// Validate a password.
///
/// Only emptiness and an upper bound are enforced; the stored secret is
/// what protects the account, not a character-class checklist.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(invalid("password", "Password cannot be empty"));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(invalid(
            "password",
            format!("Password cannot exceed {MAX_PASSWORD_LENGTH} characters"),
        ));
    }

    Ok(())
}

/// Validate a registration payload
pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    Ok(())
}

/// Validate a login payload
pub fn validate_login(req: &LoginRequest) -> Result<(), AppError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    Ok(())
}

/// Validate an anime share payload
pub fn validate_create_anime(req: &CreateAnimeRequest) -> Result<(), AppError> {
    if req.title.trim().is_empty() {
        return Err(invalid("title", "Title cannot be empty"));
    }

    if req.title.len() > MAX_TITLE_LENGTH {
        return Err(invalid(
            "title",
            format!("Title cannot exceed {MAX_TITLE_LENGTH} characters"),
        ));
    }

    if req.video_url.trim().is_empty() {
        return Err(invalid("videoUrl", "Video URL cannot be empty"));
    }

    Ok(())
}

/// Validate a comment payload
pub fn validate_create_comment(req: &CreateCommentRequest) -> Result<(), AppError> {
    if req.content.trim().is_empty() {
        return Err(invalid("content", "Comment cannot be empty"));
    }

    if req.content.len() > MAX_COMMENT_LENGTH {
        return Err(invalid(
            "content",
            format!("Comment cannot exceed {MAX_COMMENT_LENGTH} characters"),
        ));
    }

    Ok(())
}
