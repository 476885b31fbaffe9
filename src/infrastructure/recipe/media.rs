//! Media file storage for uploaded recipe images

use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::DomainError;

/// Storage for user-uploaded files addressed by relative paths
#[async_trait]
pub trait MediaStorage: Send + Sync + Debug {
    /// Write a file, replacing any existing file at the same path
    async fn save(&self, path: &str, data: &[u8]) -> Result<(), DomainError>;

    /// Remove a file, returns false if it did not exist
    async fn delete(&self, path: &str) -> Result<bool, DomainError>;

    /// Whether a file exists at the path
    async fn exists(&self, path: &str) -> Result<bool, DomainError>;

    /// Public URL under which the file is served
    fn url(&self, path: &str) -> String;
}

/// Media storage on the local filesystem below a root directory
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let mut url_prefix = url_prefix.into();
        if !url_prefix.ends_with('/') {
            url_prefix.push('/');
        }

        Self {
            root: root.into(),
            url_prefix,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative media path, rejecting anything that escapes the root
    fn resolve(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);

        let is_safe = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_safe {
            return Err(DomainError::validation(format!(
                "Invalid media path '{}'",
                path
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, path: &str, data: &[u8]) -> Result<(), DomainError> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create media directory: {}", e))
            })?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to write media file: {}", e)))?;

        debug!(path, bytes = data.len(), "Stored media file");

        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<bool, DomainError> {
        let full_path = self.resolve(path)?;

        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path, "Media file already missing");
                Ok(false)
            }
            Err(e) => Err(DomainError::storage(format!(
                "Failed to delete media file: {}",
                e
            ))),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, DomainError> {
        let full_path = self.resolve(path)?;

        tokio::fs::try_exists(&full_path)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to stat media file: {}", e)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.url_prefix, path)
    }
}
