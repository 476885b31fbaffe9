//! Recipe service

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::media::MediaStorage;
use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::recipe::{
    recipe_image_file_path, validate_price, validate_title, IdGenerator, Recipe, RecipeFilter,
    RecipeId, RecipeRepository,
};
use crate::domain::tag::{Tag, TagId};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::attribute::AttributeService;

/// Fields for a new recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub tags: Vec<TagId>,
    pub ingredients: Vec<IngredientId>,
}

/// Changes to an existing recipe, `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub tags: Option<Vec<TagId>>,
    pub ingredients: Option<Vec<IngredientId>>,
}

/// A recipe with its linked tags and ingredients loaded
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// An uploaded image file
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Owner-scoped recipe operations
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    tags: AttributeService<Tag>,
    ingredients: AttributeService<Ingredient>,
    media: Arc<dyn MediaStorage>,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for RecipeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeService")
            .field("media", &self.media)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        tags: AttributeService<Tag>,
        ingredients: AttributeService<Ingredient>,
        media: Arc<dyn MediaStorage>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            recipes,
            tags,
            ingredients,
            media,
            ids,
        }
    }

    /// The user's recipes matching the filter, newest first
    pub async fn list(
        &self,
        user_id: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, DomainError> {
        let recipes = self.recipes.list_for_user(user_id, filter).await?;
        debug!(count = recipes.len(), filtered = !filter.is_empty(), "Listed recipes");
        Ok(recipes)
    }

    /// Fetch a recipe, treating another user's recipe as missing
    pub async fn get(&self, user_id: &UserId, id: &RecipeId) -> Result<Recipe, DomainError> {
        match self.recipes.get(id).await? {
            Some(recipe) if recipe.is_owned_by(user_id) => Ok(recipe),
            _ => Err(DomainError::not_found(format!("Recipe '{}' not found", id))),
        }
    }

    /// Fetch a recipe together with its tags and ingredients
    pub async fn detail(&self, user_id: &UserId, id: &RecipeId) -> Result<RecipeDetail, DomainError> {
        let recipe = self.get(user_id, id).await?;
        self.load_detail(recipe).await
    }

    async fn load_detail(&self, recipe: Recipe) -> Result<RecipeDetail, DomainError> {
        let tags = self.tags.get_many(recipe.user_id(), recipe.tags()).await?;
        let ingredients = self
            .ingredients
            .get_many(recipe.user_id(), recipe.ingredients())
            .await?;

        Ok(RecipeDetail {
            recipe,
            tags,
            ingredients,
        })
    }

    /// Create a recipe owned by the user
    pub async fn create(&self, user_id: &UserId, new: NewRecipe) -> Result<Recipe, DomainError> {
        let title = validate_title(&new.title)?;
        let price = validate_price(new.price)?;

        self.tags.resolve_owned(user_id, &new.tags).await?;
        self.ingredients.resolve_owned(user_id, &new.ingredients).await?;

        let recipe = Recipe::new(*user_id, title, new.time_minutes, price)
            .with_tags(new.tags)
            .with_ingredients(new.ingredients);

        let recipe = self.recipes.create(recipe).await?;
        info!(recipe_id = %recipe.id(), user_id = %user_id, "Created recipe");

        Ok(recipe)
    }

    /// Apply changes to an owned recipe
    pub async fn update(
        &self,
        user_id: &UserId,
        id: &RecipeId,
        changes: RecipeChanges,
    ) -> Result<Recipe, DomainError> {
        let mut recipe = self.get(user_id, id).await?;

        if let Some(title) = changes.title {
            let title = validate_title(&title)?;
            recipe.set_title(title);
        }

        if let Some(time_minutes) = changes.time_minutes {
            recipe.set_time_minutes(time_minutes);
        }

        if let Some(price) = changes.price {
            let price = validate_price(price)?;
            recipe.set_price(price);
        }

        if let Some(tags) = changes.tags {
            self.tags.resolve_owned(user_id, &tags).await?;
            recipe.set_tags(tags);
        }

        if let Some(ingredients) = changes.ingredients {
            self.ingredients.resolve_owned(user_id, &ingredients).await?;
            recipe.set_ingredients(ingredients);
        }

        self.recipes.update(&recipe).await
    }

    /// Delete an owned recipe and its image file
    pub async fn delete(&self, user_id: &UserId, id: &RecipeId) -> Result<(), DomainError> {
        let recipe = self.get(user_id, id).await?;

        self.recipes.delete(id).await?;

        if let Some(image) = recipe.image() {
            if let Err(e) = self.media.delete(image).await {
                warn!(recipe_id = %id, error = %e, "Failed to remove recipe image");
            }
        }

        info!(recipe_id = %id, "Deleted recipe");

        Ok(())
    }

    /// Store an uploaded image for an owned recipe, replacing any previous one
    pub async fn upload_image(
        &self,
        user_id: &UserId,
        id: &RecipeId,
        upload: ImageUpload,
    ) -> Result<Recipe, DomainError> {
        let mut recipe = self.get(user_id, id).await?;

        if upload.data.is_empty() {
            return Err(DomainError::validation("The submitted file is empty."));
        }

        if !is_image(&upload) {
            return Err(DomainError::validation(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
            ));
        }

        let path = recipe_image_file_path(self.ids.as_ref(), &upload.filename);
        self.media.save(&path, &upload.data).await?;

        let previous = recipe.image().map(str::to_string);
        recipe.set_image(Some(path.clone()));

        let recipe = match self.recipes.update(&recipe).await {
            Ok(recipe) => recipe,
            Err(e) => {
                if let Err(cleanup) = self.media.delete(&path).await {
                    warn!(recipe_id = %id, error = %cleanup, "Failed to remove orphaned recipe image");
                }
                return Err(e);
            }
        };

        if let Some(previous) = previous.filter(|p| p != &path) {
            if let Err(e) = self.media.delete(&previous).await {
                warn!(recipe_id = %id, error = %e, "Failed to remove previous recipe image");
            }
        }

        info!(recipe_id = %id, path = %path, "Uploaded recipe image");

        Ok(recipe)
    }

    /// Public URL of the recipe's image
    pub fn image_url(&self, recipe: &Recipe) -> Option<String> {
        recipe.image().map(|path| self.media.url(path))
    }
}

/// Accept files whose extension maps to an image type
fn is_image(upload: &ImageUpload) -> bool {
    let by_extension = mime_guess::from_path(&upload.filename)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE);

    let declared_ok = upload
        .content_type
        .as_deref()
        .map(|ct| ct.starts_with("image/") || ct == "application/octet-stream")
        .unwrap_or(true);

    by_extension && declared_ok
}
