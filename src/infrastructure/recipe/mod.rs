//! Recipe infrastructure

mod media;
mod postgres_repository;
mod repository;
mod service;

pub use media::{LocalMediaStorage, MediaStorage};
pub use postgres_repository::PostgresRecipeRepository;
pub use repository::InMemoryRecipeRepository;
pub use service::{ImageUpload, NewRecipe, RecipeChanges, RecipeDetail, RecipeService};
