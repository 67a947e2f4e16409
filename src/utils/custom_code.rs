//! Validation for user-supplied custom short codes.

use crate::error::AppError;
use serde_json::json;

/// Validates a user-provided custom short code.
///
/// Encoder-derived codes never pass through here; their uniqueness follows
/// from the id mapping. Custom codes must fit the storage bound and stay
/// URL-safe without escaping.
///
/// # Rules
///
/// - Length: 4-20 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 4 || code.len() > 20 {
        return Err(AppError::bad_request(
            "Custom code must be 4-20 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
