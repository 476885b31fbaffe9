//! Tag domain

mod entity;

pub use entity::{Tag, TagId};
