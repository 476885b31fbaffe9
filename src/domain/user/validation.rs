//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Users must have an email address")]
    MissingEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),
}

pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Normalize an email address for storage and lookup
///
/// The whole address is trimmed and lower-cased, so `test@EXAMPLE.COM`
/// and `Test@example.com` identify the same account.
pub fn normalize_email(email: Option<&str>) -> Result<String, UserValidationError> {
    let email = email.map(str::trim).unwrap_or_default();

    if email.is_empty() {
        return Err(UserValidationError::MissingEmail);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    Ok(email.to_lowercase())
}

/// Validate a display name (may be empty)
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a password chosen through the public API
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_whole_address() {
        assert_eq!(
            normalize_email(Some("test@EXAMPLE.COM")).unwrap(),
            "test@example.com"
        );
        assert_eq!(
            normalize_email(Some("TestAdmin@Example.com")).unwrap(),
            "testadmin@example.com"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_email(Some("  user@example.com ")).unwrap(),
            "user@example.com"
        );
    }

    #[test]
    fn test_missing_email() {
        assert_eq!(normalize_email(None), Err(UserValidationError::MissingEmail));
        assert_eq!(normalize_email(Some("")), Err(UserValidationError::MissingEmail));
        assert_eq!(normalize_email(Some("   ")), Err(UserValidationError::MissingEmail));
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            normalize_email(Some(&email)),
            Err(UserValidationError::EmailTooLong(255))
        );
    }

    #[test]
    fn test_name_length() {
        assert!(validate_name("").is_ok());
        assert!(validate_name("Test User full name").is_ok());
        assert_eq!(
            validate_name(&"n".repeat(256)),
            Err(UserValidationError::NameTooLong(255))
        );
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("12345").is_ok());
        assert_eq!(
            validate_password("pw"),
            Err(UserValidationError::PasswordTooShort(5))
        );
    }
}
