//! Recipe entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::attribute::AttributeKind;
use crate::domain::id::{entity_id, EntityId};
use crate::domain::ingredient::IngredientId;
use crate::domain::tag::TagId;
use crate::domain::user::UserId;

entity_id!(
    /// Recipe identifier
    RecipeId,
    "recipe"
);

/// A user's recipe together with its tag and ingredient links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    user_id: UserId,
    title: String,
    time_minutes: i32,
    price: Decimal,
    /// Path of the uploaded image relative to the media root
    image: Option<String>,
    tags: Vec<TagId>,
    ingredients: Vec<IngredientId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe without links or image
    pub fn new(user_id: UserId, title: impl Into<String>, time_minutes: i32, price: Decimal) -> Self {
        let now = Utc::now();

        Self {
            id: RecipeId::generate(),
            user_id,
            title: title.into(),
            time_minutes,
            price,
            image: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = dedup(tags);
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<IngredientId>) -> Self {
        self.ingredients = dedup(ingredients);
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Override identity and timestamps for a recipe loaded from storage
    pub fn with_identity(
        mut self,
        id: RecipeId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.id = id;
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // Getters

    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn time_minutes(&self) -> i32 {
        self.time_minutes
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn ingredients(&self) -> &[IngredientId] {
        &self.ingredients
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Raw ids of the linked attributes of the given kind
    pub fn attribute_ids(&self, kind: AttributeKind) -> Vec<Uuid> {
        match kind {
            AttributeKind::Tag => self.tags.iter().map(EntityId::as_uuid).collect(),
            AttributeKind::Ingredient => self.ingredients.iter().map(EntityId::as_uuid).collect(),
        }
    }

    // Mutators

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_time_minutes(&mut self, time_minutes: i32) {
        self.time_minutes = time_minutes;
        self.touch();
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
        self.touch();
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.touch();
    }

    pub fn set_tags(&mut self, tags: Vec<TagId>) {
        self.tags = dedup(tags);
        self.touch();
    }

    pub fn set_ingredients(&mut self, ingredients: Vec<IngredientId>) {
        self.ingredients = dedup(ingredients);
        self.touch();
    }

    /// Remove a linked attribute, returns true if it was linked
    pub fn detach(&mut self, kind: AttributeKind, id: Uuid) -> bool {
        let removed = match kind {
            AttributeKind::Tag => remove_id(&mut self.tags, id),
            AttributeKind::Ingredient => remove_id(&mut self.ingredients, id),
        };

        if removed {
            self.touch();
        }

        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

fn dedup<I: EntityId>(ids: Vec<I>) -> Vec<I> {
    let mut unique = Vec::with_capacity(ids.len());

    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    unique
}

fn remove_id<I: EntityId>(ids: &mut Vec<I>, id: Uuid) -> bool {
    let before = ids.len();
    ids.retain(|existing| existing.as_uuid() != id);
    ids.len() != before
}

/// Restrict a recipe listing to recipes linked to any of the given attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub tags: Vec<TagId>,
    pub ingredients: Vec<IngredientId>,
}

impl RecipeFilter {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.ingredients.is_empty()
    }

    /// Whether the recipe has at least one of each requested attribute list
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let tags_match =
            self.tags.is_empty() || recipe.tags().iter().any(|t| self.tags.contains(t));
        let ingredients_match = self.ingredients.is_empty()
            || recipe.ingredients().iter().any(|i| self.ingredients.contains(i));

        tags_match && ingredients_match
    }
}
