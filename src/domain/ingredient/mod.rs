//! Ingredient domain

mod entity;

pub use entity::{Ingredient, IngredientId};
