//! User API types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::user::User;
use crate::infrastructure::user::{CreateUserRequest, UpdateProfileRequest};

/// POST /api/user/create/ body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserApiRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: String,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            name: request.name,
        }
    }
}

/// PATCH /api/user/me/ body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileApiRequest {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
    pub password: Option<String>,
}

impl From<UpdateProfileApiRequest> for UpdateProfileRequest {
    fn from(request: UpdateProfileApiRequest) -> Self {
        Self {
            name: request.name,
            password: request.password,
        }
    }
}

/// POST /api/user/token/ body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of a user; the password hash never leaves the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email().to_string(),
            name: user.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let request: CreateUserApiRequest = serde_json::from_value(serde_json::json!({
            "email": "test@example.com",
            "password": "pw",
            "name": "Test name",
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let request: CreateUserApiRequest = serde_json::from_value(serde_json::json!({
            "email": "test@example.com",
            "password": "testpass123",
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.name, "");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request: CreateUserApiRequest = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "password": "testpass123",
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_blank_token_fields_rejected() {
        let request: TokenRequest = serde_json::from_value(serde_json::json!({
            "email": "test@example.com",
            "password": "",
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_profile_update_allows_partial() {
        let request: UpdateProfileApiRequest =
            serde_json::from_value(serde_json::json!({"name": "New name"})).unwrap();

        assert!(request.validate().is_ok());
        assert!(request.password.is_none());
    }
}
