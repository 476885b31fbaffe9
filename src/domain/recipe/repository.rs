//! Recipe repository trait

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use super::{Recipe, RecipeFilter, RecipeId};
use crate::domain::attribute::AttributeKind;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for recipe storage, including tag and ingredient links
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Get a recipe by its ID regardless of owner
    async fn get(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError>;

    /// Create a new recipe with its links
    async fn create(&self, recipe: Recipe) -> Result<Recipe, DomainError>;

    /// Replace a stored recipe and its links
    async fn update(&self, recipe: &Recipe) -> Result<Recipe, DomainError>;

    /// Delete a recipe, returns true if it existed
    async fn delete(&self, id: &RecipeId) -> Result<bool, DomainError>;

    /// The user's recipes matching the filter, newest first
    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, DomainError>;

    /// Distinct ids of the user's attributes of `kind` linked to at least one recipe
    async fn assigned_attribute_ids(
        &self,
        user_id: &UserId,
        kind: AttributeKind,
    ) -> Result<Vec<Uuid>, DomainError>;

    /// Unlink an attribute from every recipe, returns the number of recipes touched
    async fn detach_attribute(&self, kind: AttributeKind, id: Uuid) -> Result<usize, DomainError>;

    /// Delete every recipe owned by the user, returns the number removed
    async fn delete_for_user(&self, user_id: &UserId) -> Result<usize, DomainError>;
}
