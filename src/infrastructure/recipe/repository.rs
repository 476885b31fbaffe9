//! In-memory recipe repository implementation

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::attribute::AttributeKind;
use crate::domain::recipe::{Recipe, RecipeFilter, RecipeId, RecipeRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of RecipeRepository
///
/// Links are the id lists stored on each recipe.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Arc<RwLock<HashMap<RecipeId, Recipe>>>,
}

impl InMemoryRecipeRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn get(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.get(id).cloned())
    }

    async fn create(&self, recipe: Recipe) -> Result<Recipe, DomainError> {
        let mut recipes = self.recipes.write().await;

        if recipes.contains_key(recipe.id()) {
            return Err(DomainError::conflict(format!(
                "Recipe with ID '{}' already exists",
                recipe.id()
            )));
        }

        recipes.insert(*recipe.id(), recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let mut recipes = self.recipes.write().await;

        match recipes.get_mut(recipe.id()) {
            Some(existing) => {
                *existing = recipe.clone();
                Ok(recipe.clone())
            }
            None => Err(DomainError::not_found(format!(
                "Recipe '{}' not found",
                recipe.id()
            ))),
        }
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, DomainError> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes.remove(id).is_some())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, DomainError> {
        let recipes = self.recipes.read().await;

        let mut result: Vec<Recipe> = recipes
            .values()
            .filter(|r| r.is_owned_by(user_id) && filter.matches(r))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(result)
    }

    async fn assigned_attribute_ids(
        &self,
        user_id: &UserId,
        kind: AttributeKind,
    ) -> Result<Vec<Uuid>, DomainError> {
        let recipes = self.recipes.read().await;
        let mut seen = HashSet::new();

        Ok(recipes
            .values()
            .filter(|r| r.is_owned_by(user_id))
            .flat_map(|r| r.attribute_ids(kind))
            .filter(|id| seen.insert(*id))
            .collect())
    }

    async fn detach_attribute(&self, kind: AttributeKind, id: Uuid) -> Result<usize, DomainError> {
        let mut recipes = self.recipes.write().await;

        Ok(recipes
            .values_mut()
            .map(|r| r.detach(kind, id))
            .filter(|removed| *removed)
            .count())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|_, r| !r.is_owned_by(user_id));
        Ok(before - recipes.len())
    }
}
