//! Recipe API types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::attribute::AttributeResponse;
use crate::api::types::ApiError;
use crate::domain::id::EntityId;
use crate::domain::ingredient::IngredientId;
use crate::domain::recipe::{Recipe, RecipeFilter};
use crate::domain::tag::TagId;
use crate::infrastructure::recipe::{NewRecipe, RecipeChanges, RecipeDetail};

/// POST and PUT body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub title: String,

    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub time_minutes: i32,

    pub price: Decimal,

    pub tags: Option<Vec<Uuid>>,

    pub ingredients: Option<Vec<Uuid>>,
}

impl From<RecipeRequest> for NewRecipe {
    fn from(request: RecipeRequest) -> Self {
        Self {
            title: request.title,
            time_minutes: request.time_minutes,
            price: request.price,
            tags: to_ids(request.tags.unwrap_or_default()),
            ingredients: to_ids(request.ingredients.unwrap_or_default()),
        }
    }
}

impl From<RecipeRequest> for RecipeChanges {
    fn from(request: RecipeRequest) -> Self {
        Self {
            title: Some(request.title),
            time_minutes: Some(request.time_minutes),
            price: Some(request.price),
            tags: request.tags.map(to_ids),
            ingredients: request.ingredients.map(to_ids),
        }
    }
}

/// PATCH body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipePatchRequest {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub title: Option<String>,

    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub time_minutes: Option<i32>,

    pub price: Option<Decimal>,

    pub tags: Option<Vec<Uuid>>,

    pub ingredients: Option<Vec<Uuid>>,
}

impl From<RecipePatchRequest> for RecipeChanges {
    fn from(request: RecipePatchRequest) -> Self {
        Self {
            title: request.title,
            time_minutes: request.time_minutes,
            price: request.price,
            tags: request.tags.map(to_ids),
            ingredients: request.ingredients.map(to_ids),
        }
    }
}

fn to_ids<I: EntityId>(ids: Vec<Uuid>) -> Vec<I> {
    ids.into_iter().map(I::from_uuid).collect()
}

/// List form: linked records as bare ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().as_uuid(),
            title: recipe.title().to_string(),
            time_minutes: recipe.time_minutes(),
            price: recipe.price(),
            tags: recipe.tags().iter().map(EntityId::as_uuid).collect(),
            ingredients: recipe.ingredients().iter().map(EntityId::as_uuid).collect(),
        }
    }
}

/// Detail form: linked records nested, plus the image URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub tags: Vec<AttributeResponse>,
    pub ingredients: Vec<AttributeResponse>,
    pub image: Option<String>,
}

impl RecipeDetailResponse {
    pub fn new(detail: &RecipeDetail, image: Option<String>) -> Self {
        let recipe = &detail.recipe;

        Self {
            id: recipe.id().as_uuid(),
            title: recipe.title().to_string(),
            time_minutes: recipe.time_minutes(),
            price: recipe.price(),
            tags: detail.tags.iter().map(AttributeResponse::from_attribute).collect(),
            ingredients: detail
                .ingredients
                .iter()
                .map(AttributeResponse::from_attribute)
                .collect(),
            image,
        }
    }
}

/// Response of the upload-image action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeImageResponse {
    pub id: Uuid,
    pub image: Option<String>,
}

/// Query string of the recipe list: comma separated ids
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

impl RecipeListQuery {
    pub fn to_filter(&self) -> Result<RecipeFilter, ApiError> {
        Ok(RecipeFilter {
            tags: parse_id_list(self.tags.as_deref(), "tags", TagId::parse)?,
            ingredients: parse_id_list(
                self.ingredients.as_deref(),
                "ingredients",
                IngredientId::parse,
            )?,
        })
    }
}

fn parse_id_list<I, F>(value: Option<&str>, param: &str, parse: F) -> Result<Vec<I>, ApiError>
where
    F: Fn(&str) -> Result<I, crate::domain::DomainError>,
{
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse(part).map_err(|e| ApiError::from(e).with_param(param)))
        .collect()
}
