//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::password::PasswordHasher;
use crate::domain::id::entity_id;

entity_id!(
    /// User identifier
    UserId,
    "user"
);

/// Account flags controlling login and admin access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFlags {
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserFlags {
    /// Flags for a regular, active account
    pub fn regular() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Flags for an active superuser (always staff)
    pub fn superuser() -> Self {
        Self {
            is_active: true,
            is_staff: true,
            is_superuser: true,
        }
    }
}

impl Default for UserFlags {
    fn default() -> Self {
        Self::regular()
    }
}

/// User account identified by a normalized email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    /// Lower-cased email, unique across accounts
    email: String,
    name: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    #[serde(flatten)]
    flags: UserFlags,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from an already normalized email and hashed password
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
        flags: UserFlags,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::generate(),
            email: email.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            flags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user loaded from persistent storage
    pub fn restore(
        id: UserId,
        email: String,
        name: String,
        password_hash: String,
        flags: UserFlags,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            flags,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn flags(&self) -> UserFlags {
        self.flags
    }

    pub fn is_active(&self) -> bool {
        self.flags.is_active
    }

    pub fn is_staff(&self) -> bool {
        self.flags.is_staff
    }

    pub fn is_superuser(&self) -> bool {
        self.flags.is_superuser
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Verify a plain-text password against the stored hash
    pub fn check_password(&self, password: &str, hasher: &dyn PasswordHasher) -> bool {
        hasher.verify(password, &self.password_hash)
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    pub fn set_flags(&mut self, flags: UserFlags) {
        self.flags = flags;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.email)
    }
}
