//! Domain layer - Core business logic and entities

pub mod attribute;
pub mod error;
pub mod id;
pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

pub use attribute::{
    validate_attribute_name, AttributeKind, AttributeRepository, AttributeValidationError,
    RecipeAttribute,
};
pub use error::DomainError;
pub use id::EntityId;
pub use ingredient::{Ingredient, IngredientId};
pub use recipe::{
    recipe_image_file_path, IdGenerator, Recipe, RecipeFilter, RecipeId, RecipeRepository,
    RecipeValidationError, UuidGenerator,
};
pub use tag::{Tag, TagId};
pub use user::{PasswordHasher, User, UserFlags, UserId, UserRepository, UserValidationError};
