//! Recipe domain

mod entity;
mod image;
mod repository;
mod validation;

pub use entity::{Recipe, RecipeFilter, RecipeId};
pub use image::{
    recipe_image_file_path, FixedIdGenerator, IdGenerator, UuidGenerator, RECIPE_IMAGE_DIR,
};
#[cfg(test)]
pub use repository::MockRecipeRepository;
pub use repository::RecipeRepository;
pub use validation::{
    validate_price, validate_title, RecipeValidationError, MAX_TITLE_LENGTH, PRICE_DECIMAL_PLACES,
    PRICE_MAX_DIGITS,
};
