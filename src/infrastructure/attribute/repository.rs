//! In-memory attribute repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::attribute::{sort_by_name_desc, AttributeRepository, RecipeAttribute};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of AttributeRepository for tags and ingredients
#[derive(Debug)]
pub struct InMemoryAttributeRepository<A: RecipeAttribute> {
    attributes: Arc<RwLock<HashMap<A::Id, A>>>,
}

impl<A: RecipeAttribute> InMemoryAttributeRepository<A> {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            attributes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<A: RecipeAttribute> Default for InMemoryAttributeRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A: RecipeAttribute> AttributeRepository<A> for InMemoryAttributeRepository<A> {
    async fn get(&self, id: &A::Id) -> Result<Option<A>, DomainError> {
        let attributes = self.attributes.read().await;
        Ok(attributes.get(id).cloned())
    }

    async fn create(&self, attribute: A) -> Result<A, DomainError> {
        let mut attributes = self.attributes.write().await;
        let id = attribute.id();

        if attributes.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "{} with ID '{}' already exists",
                A::KIND,
                id
            )));
        }

        attributes.insert(id, attribute.clone());
        Ok(attribute)
    }

    async fn update(&self, attribute: &A) -> Result<A, DomainError> {
        let mut attributes = self.attributes.write().await;

        match attributes.get_mut(&attribute.id()) {
            Some(existing) => {
                *existing = attribute.clone();
                Ok(attribute.clone())
            }
            None => Err(DomainError::not_found(format!(
                "{} '{}' not found",
                A::KIND,
                attribute.id()
            ))),
        }
    }

    async fn delete(&self, id: &A::Id) -> Result<bool, DomainError> {
        let mut attributes = self.attributes.write().await;
        Ok(attributes.remove(id).is_some())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<A>, DomainError> {
        let attributes = self.attributes.read().await;

        let mut owned: Vec<A> = attributes
            .values()
            .filter(|a| a.is_owned_by(user_id))
            .cloned()
            .collect();
        sort_by_name_desc(&mut owned);

        Ok(owned)
    }

    async fn get_many_for_user(
        &self,
        user_id: &UserId,
        ids: &[A::Id],
    ) -> Result<Vec<A>, DomainError> {
        let attributes = self.attributes.read().await;

        Ok(ids
            .iter()
            .filter_map(|id| attributes.get(id))
            .filter(|a| a.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let mut attributes = self.attributes.write().await;
        let before = attributes.len();
        attributes.retain(|_, a| !a.is_owned_by(user_id));
        Ok(before - attributes.len())
    }
}
