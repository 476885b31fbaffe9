//! Recipe API: tags, ingredients and recipes, all scoped to the caller

pub mod attributes;
pub mod recipes;

use axum::Router;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::ingredient::Ingredient;
use crate::domain::tag::Tag;

pub use attributes::AttributeEndpoint;

/// Create the recipe router, mounted at `/api/recipe`
pub fn create_recipe_api_router() -> Router<AppState> {
    Router::new()
        .merge(attributes::create_attribute_router::<Tag>())
        .merge(attributes::create_attribute_router::<Ingredient>())
        .merge(recipes::create_recipe_router())
}

/// Parse the id segment of a detail route; a malformed id cannot match a record
pub(crate) fn parse_path_id(label: &str, id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id.trim()).map_err(|_| ApiError::not_found(format!("{} '{}' not found", label, id)))
}
