//! Recipe image file naming

use std::fmt::Debug;

use uuid::Uuid;

/// Directory, relative to the media root, holding recipe images
pub const RECIPE_IMAGE_DIR: &str = "uploads/recipe";

/// Source of unique file stems for uploaded images
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> String;
}

/// Generates random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Always returns the same identifier
#[derive(Debug, Clone)]
pub struct FixedIdGenerator(String);

impl FixedIdGenerator {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// Build the storage path for an uploaded recipe image.
///
/// The client filename only contributes its extension, the stem is a fresh
/// identifier so uploads never collide. A filename without a dot yields a
/// path with no extension.
pub fn recipe_image_file_path(ids: &dyn IdGenerator, filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let extension = match basename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{}", ext),
        _ => String::new(),
    };

    format!("{}/{}{}", RECIPE_IMAGE_DIR, ids.generate(), extension)
}
