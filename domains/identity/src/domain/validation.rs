//! Password format rules enforced at the request boundary

use regex::Regex;

/// Minimum length of a new password
pub const MIN_PASSWORD_LENGTH: usize = 8;

lazy_static::lazy_static! {
    /// At least one ASCII digit
    pub static ref CONTAINS_DIGIT: Regex = Regex::new(r"[0-9]").unwrap();

    /// At least one ASCII uppercase letter
    pub static ref CONTAINS_UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
}

/// True iff `password` has at least 8 characters, a digit and an uppercase letter
pub fn validate_password_strength(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && CONTAINS_DIGIT.is_match(password)
        && CONTAINS_UPPERCASE.is_match(password)
}

/// `validator` hook for new-password fields
pub fn validate_new_password(password: &str) -> Result<(), validator::ValidationError> {
    if validate_password_strength(password) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("weak_password"))
    }
}
