//! Recipe attributes
//!
//! Tags and ingredients are both small user-owned records that recipes link
//! to. They share one repository contract and one service so the ownership
//! and `assigned_only` rules are written once.

mod repository;
mod validation;

use std::fmt::{Debug, Display};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::id::EntityId;
use crate::domain::user::UserId;

pub use repository::AttributeRepository;
pub use validation::{validate_attribute_name, AttributeValidationError, MAX_ATTRIBUTE_NAME_LENGTH};

/// Which attribute collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Tag,
    Ingredient,
}

impl AttributeKind {
    /// Human readable singular label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tag => "Tag",
            Self::Ingredient => "Ingredient",
        }
    }

    /// Table holding the attribute rows
    pub fn table(&self) -> &'static str {
        match self {
            Self::Tag => "tags",
            Self::Ingredient => "ingredients",
        }
    }

    /// Join table linking recipes to the attribute
    pub fn join_table(&self) -> &'static str {
        match self {
            Self::Tag => "recipe_tags",
            Self::Ingredient => "recipe_ingredients",
        }
    }

    /// Attribute column inside the join table
    pub fn join_column(&self) -> &'static str {
        match self {
            Self::Tag => "tag_id",
            Self::Ingredient => "ingredient_id",
        }
    }
}

impl Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named, user-owned record that recipes can reference
pub trait RecipeAttribute:
    Clone + Debug + Display + Serialize + Send + Sync + 'static
{
    type Id: EntityId + Display + Serialize;

    const KIND: AttributeKind;

    /// Create a new attribute with a fresh identifier
    fn new(user_id: UserId, name: String) -> Self;

    /// Rebuild an attribute loaded from persistent storage
    fn restore(id: Self::Id, user_id: UserId, name: String, created_at: DateTime<Utc>) -> Self;

    fn id(&self) -> Self::Id;

    fn user_id(&self) -> &UserId;

    fn name(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn set_name(&mut self, name: String);

    /// Whether the attribute belongs to the given user
    fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id() == user_id
    }
}

/// Sort attributes by name, descending
pub fn sort_by_name_desc<A: RecipeAttribute>(attributes: &mut [A]) {
    attributes.sort_by(|a, b| b.name().cmp(a.name()));
}
