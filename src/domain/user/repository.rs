//! User persistence

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Storage of user accounts. Emails are stored normalized and unique.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Look up by an already normalized email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Fails with `Conflict` when the email is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Returns false when there was no such user
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// Oldest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
