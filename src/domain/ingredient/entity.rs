//! Ingredient entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::attribute::{AttributeKind, RecipeAttribute};
use crate::domain::id::entity_id;
use crate::domain::user::UserId;

entity_id!(
    /// Ingredient identifier
    IngredientId,
    "ingredient"
);

/// An ingredient a user keeps in their pantry list, e.g. "Cucumber"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    id: IngredientId,
    user_id: UserId,
    name: String,
    created_at: DateTime<Utc>,
}

impl RecipeAttribute for Ingredient {
    type Id = IngredientId;

    const KIND: AttributeKind = AttributeKind::Ingredient;

    fn new(user_id: UserId, name: String) -> Self {
        Self {
            id: IngredientId::generate(),
            user_id,
            name,
            created_at: Utc::now(),
        }
    }

    fn restore(
        id: IngredientId,
        user_id: UserId,
        name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            created_at,
        }
    }

    fn id(&self) -> IngredientId {
        self.id
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
