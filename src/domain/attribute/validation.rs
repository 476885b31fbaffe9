use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttributeValidationError {
    #[error("Name cannot be blank")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),
}

pub const MAX_ATTRIBUTE_NAME_LENGTH: usize = 255;

/// Validate and trim a tag or ingredient name
pub fn validate_attribute_name(name: &str) -> Result<String, AttributeValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(AttributeValidationError::EmptyName);
    }

    if name.chars().count() > MAX_ATTRIBUTE_NAME_LENGTH {
        return Err(AttributeValidationError::NameTooLong(MAX_ATTRIBUTE_NAME_LENGTH));
    }

    Ok(name.to_string())
}
