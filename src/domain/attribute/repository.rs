//! Attribute repository trait

use async_trait::async_trait;

use super::RecipeAttribute;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait shared by tag and ingredient storage
#[async_trait]
pub trait AttributeRepository<A: RecipeAttribute>: Send + Sync {
    /// Get an attribute by its ID regardless of owner
    async fn get(&self, id: &A::Id) -> Result<Option<A>, DomainError>;

    /// Create a new attribute
    async fn create(&self, attribute: A) -> Result<A, DomainError>;

    /// Update an existing attribute
    async fn update(&self, attribute: &A) -> Result<A, DomainError>;

    /// Delete an attribute, returns true if it existed
    async fn delete(&self, id: &A::Id) -> Result<bool, DomainError>;

    /// All attributes owned by the user, ordered by name descending
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<A>, DomainError>;

    /// The subset of `ids` that exist and belong to the user
    async fn get_many_for_user(
        &self,
        user_id: &UserId,
        ids: &[A::Id],
    ) -> Result<Vec<A>, DomainError>;

    /// Delete every attribute owned by the user, returns the number removed
    async fn delete_for_user(&self, user_id: &UserId) -> Result<usize, DomainError>;
}
