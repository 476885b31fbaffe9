//! Tag and ingredient API types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::types::ApiError;
use crate::domain::attribute::RecipeAttribute;
use crate::domain::id::EntityId;

/// POST and PUT body for a tag or ingredient
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttributeRequest {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: String,
}

/// PATCH body; an absent name leaves the record as it is
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AttributePatchRequest {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeResponse {
    pub id: Uuid,
    pub name: String,
}

impl AttributeResponse {
    pub fn from_attribute<A: RecipeAttribute>(attribute: &A) -> Self {
        Self {
            id: attribute.id().as_uuid(),
            name: attribute.name().to_string(),
        }
    }
}

/// Query string of the list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeListQuery {
    pub assigned_only: Option<String>,
}

impl AttributeListQuery {
    /// Interpret `assigned_only`, which accepts only `0` and `1`
    pub fn assigned_only(&self) -> Result<bool, ApiError> {
        match self.assigned_only.as_deref().map(str::trim) {
            None | Some("") | Some("0") => Ok(false),
            Some("1") => Ok(true),
            Some(other) => Err(ApiError::bad_request(format!(
                "'{}' is not a valid value for assigned_only, expected 0 or 1",
                other
            ))
            .with_param("assigned_only")),
        }
    }
}
