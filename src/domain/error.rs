use thiserror::Error;

use super::attribute::AttributeValidationError;
use super::recipe::RecipeValidationError;
use super::user::UserValidationError;

/// Errors shared by every domain service.
///
/// `NotFound` also covers records owned by another user, so callers never
/// learn whether a foreign id exists.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid id: {message}")]
    InvalidId { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The request can be retried with different input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage { .. } | Self::Internal { .. })
    }
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<AttributeValidationError> for DomainError {
    fn from(err: AttributeValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<RecipeValidationError> for DomainError {
    fn from(err: RecipeValidationError) -> Self {
        Self::validation(err.to_string())
    }
}
