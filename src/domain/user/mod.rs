//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, email normalization and repository traits.

mod entity;
mod password;
mod repository;
mod validation;

pub use entity::{User, UserFlags, UserId};
pub use password::PasswordHasher;
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_name, validate_password, UserValidationError, MAX_NAME_LENGTH,
    MIN_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
