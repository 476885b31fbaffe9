//! Tag and ingredient service

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::attribute::{
    sort_by_name_desc, validate_attribute_name, AttributeRepository, RecipeAttribute,
};
use crate::domain::id::EntityId;
use crate::domain::recipe::RecipeRepository;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Owner-scoped operations on one attribute collection
pub struct AttributeService<A: RecipeAttribute> {
    repository: Arc<dyn AttributeRepository<A>>,
    recipes: Arc<dyn RecipeRepository>,
}

impl<A: RecipeAttribute> Clone for AttributeService<A> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            recipes: self.recipes.clone(),
        }
    }
}

impl<A: RecipeAttribute> std::fmt::Debug for AttributeService<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeService")
            .field("kind", &A::KIND)
            .finish_non_exhaustive()
    }
}

impl<A: RecipeAttribute> AttributeService<A> {
    pub fn new(
        repository: Arc<dyn AttributeRepository<A>>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            repository,
            recipes,
        }
    }

    /// List the user's attributes by name descending
    ///
    /// With `assigned_only` set, only attributes linked to at least one of
    /// the user's recipes are returned, each once.
    pub async fn list(&self, user_id: &UserId, assigned_only: bool) -> Result<Vec<A>, DomainError> {
        let mut attributes = self.repository.list_for_user(user_id).await?;

        if assigned_only {
            let assigned: HashSet<_> = self
                .recipes
                .assigned_attribute_ids(user_id, A::KIND)
                .await?
                .into_iter()
                .collect();

            attributes.retain(|a| assigned.contains(&a.id().as_uuid()));
        }

        sort_by_name_desc(&mut attributes);

        debug!(kind = %A::KIND, count = attributes.len(), assigned_only, "Listed attributes");

        Ok(attributes)
    }

    /// Create an attribute owned by the user
    pub async fn create(&self, user_id: &UserId, name: &str) -> Result<A, DomainError> {
        let name = validate_attribute_name(name)?;
        self.repository.create(A::new(*user_id, name)).await
    }

    /// Fetch an attribute, treating another user's record as missing
    pub async fn get(&self, user_id: &UserId, id: &A::Id) -> Result<A, DomainError> {
        match self.repository.get(id).await? {
            Some(attribute) if attribute.is_owned_by(user_id) => Ok(attribute),
            _ => Err(DomainError::not_found(format!("{} '{}' not found", A::KIND, id))),
        }
    }

    /// Rename an owned attribute
    pub async fn rename(&self, user_id: &UserId, id: &A::Id, name: &str) -> Result<A, DomainError> {
        let name = validate_attribute_name(name)?;

        let mut attribute = self.get(user_id, id).await?;
        attribute.set_name(name);

        self.repository.update(&attribute).await
    }

    /// Delete an owned attribute and unlink it from every recipe
    pub async fn delete(&self, user_id: &UserId, id: &A::Id) -> Result<(), DomainError> {
        let attribute = self.get(user_id, id).await?;

        let detached = self
            .recipes
            .detach_attribute(A::KIND, attribute.id().as_uuid())
            .await?;
        self.repository.delete(id).await?;

        debug!(kind = %A::KIND, id = %id, detached, "Deleted attribute");

        Ok(())
    }

    /// Load the given attributes, failing unless every one is owned by the user
    pub async fn resolve_owned(&self, user_id: &UserId, ids: &[A::Id]) -> Result<Vec<A>, DomainError> {
        let mut unique: Vec<A::Id> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        let found = self.repository.get_many_for_user(user_id, &unique).await?;

        if let Some(missing) = unique
            .iter()
            .find(|id| !found.iter().any(|a| &a.id() == *id))
        {
            return Err(DomainError::validation(format!(
                "Invalid {} '{}' - object does not exist.",
                A::KIND.label().to_lowercase(),
                missing
            )));
        }

        Ok(found)
    }

    /// Load attributes owned by the user, in the order of `ids`, skipping missing ones
    pub async fn get_many(&self, user_id: &UserId, ids: &[A::Id]) -> Result<Vec<A>, DomainError> {
        let found = self.repository.get_many_for_user(user_id, ids).await?;

        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|a| &a.id() == id).cloned())
            .collect())
    }
}
