//! Password hashing seam

use std::fmt::Debug;

use crate::domain::DomainError;

/// One-way password hashing.
///
/// Hashes are self-describing strings, so a stored hash stays verifiable
/// after the hashing parameters change.
pub trait PasswordHasher: Send + Sync + Debug {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// False for a wrong password and for a malformed hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}
