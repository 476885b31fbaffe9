//! Application state for shared services

use std::path::PathBuf;
use std::sync::Arc;

use tera::Tera;

use crate::domain::ingredient::Ingredient;
use crate::domain::tag::Tag;
use crate::infrastructure::attribute::AttributeService;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::recipe::RecipeService;
use crate::infrastructure::user::UserService;

/// Where uploaded media lives on disk and under which URL it is served
#[derive(Debug, Clone)]
pub struct MediaMount {
    pub root: PathBuf,
    pub url_prefix: String,
}

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub tag_service: Arc<AttributeService<Tag>>,
    pub ingredient_service: Arc<AttributeService<Ingredient>>,
    pub recipe_service: Arc<RecipeService>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub templates: Arc<Tera>,
    pub media: MediaMount,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_service", &self.jwt_service)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        tag_service: Arc<AttributeService<Tag>>,
        ingredient_service: Arc<AttributeService<Ingredient>>,
        recipe_service: Arc<RecipeService>,
        jwt_service: Arc<dyn JwtGenerator>,
        templates: Arc<Tera>,
        media: MediaMount,
    ) -> Self {
        Self {
            user_service,
            tag_service,
            ingredient_service,
            recipe_service,
            jwt_service,
            templates,
            media,
        }
    }
}
