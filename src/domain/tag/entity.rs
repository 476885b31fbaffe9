//! Tag entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::attribute::{AttributeKind, RecipeAttribute};
use crate::domain::id::entity_id;
use crate::domain::user::UserId;

entity_id!(
    /// Tag identifier
    TagId,
    "tag"
);

/// A user-defined label attached to recipes, e.g. "Vegan" or "Dessert"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    user_id: UserId,
    name: String,
    created_at: DateTime<Utc>,
}

impl RecipeAttribute for Tag {
    type Id = TagId;

    const KIND: AttributeKind = AttributeKind::Tag;

    fn new(user_id: UserId, name: String) -> Self {
        Self {
            id: TagId::generate(),
            user_id,
            name,
            created_at: Utc::now(),
        }
    }

    fn restore(id: TagId, user_id: UserId, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            name,
            created_at,
        }
    }

    fn id(&self) -> TagId {
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

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
