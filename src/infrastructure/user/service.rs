//! User service for registration, authentication and profile management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::attribute::AttributeRepository;
use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::RecipeRepository;
use crate::domain::tag::Tag;
use crate::domain::user::{
    normalize_email, validate_name, validate_password, PasswordHasher, User, UserFlags, UserId,
    UserRepository,
};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    /// Raw email as supplied by the caller, `None` when absent
    pub email: Option<String>,
    pub password: String,
    pub name: String,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: password.into(),
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Partial update of the signed-in user's profile
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// User service for account management
///
/// Deleting a user also removes the recipes, tags and ingredients they own,
/// so the service holds the repositories of every owned record type.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    recipes: Arc<dyn RecipeRepository>,
    tags: Arc<dyn AttributeRepository<Tag>>,
    ingredients: Arc<dyn AttributeRepository<Ingredient>>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        recipes: Arc<dyn RecipeRepository>,
        tags: Arc<dyn AttributeRepository<Tag>>,
        ingredients: Arc<dyn AttributeRepository<Ingredient>>,
    ) -> Self {
        Self {
            users,
            hasher,
            recipes,
            tags,
            ingredients,
        }
    }

    /// Create a regular user with a hashed password and normalized email
    ///
    /// A missing or empty email is the only rejected input. Password length
    /// rules belong to the HTTP layer, so CLI and bootstrap paths may set any
    /// password.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        self.create_with_flags(request, UserFlags::regular()).await
    }

    /// Create a staff superuser
    pub async fn create_superuser(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        self.create_with_flags(request, UserFlags::superuser()).await
    }

    async fn create_with_flags(
        &self,
        request: CreateUserRequest,
        flags: UserFlags,
    ) -> Result<User, DomainError> {
        let email = normalize_email(request.email.as_deref())?;
        validate_name(&request.name)?;

        if self.users.get_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("A user with that email already exists"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = self
            .users
            .create(User::new(email, request.name, password_hash, flags))
            .await?;

        info!(user_id = %user.id(), staff = user.is_staff(), "Created user");

        Ok(user)
    }

    /// Return the user when the credentials match an active account
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = match normalize_email(Some(email)) {
            Ok(email) => email,
            Err(_) => return Ok(None),
        };

        let user = match self.users.get_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("Authentication failed: unknown email");
                return Ok(None);
            }
        };

        if !user.is_active() || !self.check_password(&user, password) {
            debug!(user_id = %user.id(), "Authentication failed");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Verify a password against the user's stored hash
    pub fn check_password(&self, user: &User, password: &str) -> bool {
        user.check_password(password, self.hasher.as_ref())
    }

    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.users.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.users.count().await
    }

    /// Apply a partial profile update, re-hashing a new password
    pub async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let mut user = self
            .users
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        if let Some(name) = request.name {
            validate_name(&name)?;
            user.set_name(name);
        }

        if let Some(password) = request.password {
            validate_password(&password)?;
            user.set_password_hash(self.hasher.hash(&password)?);
        }

        self.users.update(&user).await
    }

    /// Delete a user together with everything they own
    pub async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        if self.users.get(id).await?.is_none() {
            return Ok(false);
        }

        let recipes = self.recipes.delete_for_user(id).await?;
        let tags = self.tags.delete_for_user(id).await?;
        let ingredients = self.ingredients.delete_for_user(id).await?;

        info!(
            user_id = %id,
            recipes,
            tags,
            ingredients,
            "Deleting user and owned records"
        );

        self.users.delete(id).await
    }
}
