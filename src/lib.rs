//! Recipe App API
//!
//! A recipe-management HTTP service where users keep their own recipes,
//! tags and ingredients:
//! - JWT authentication with Argon2 password hashing
//! - In-memory or PostgreSQL storage
//! - Recipe image uploads served from a local media directory
//! - An HTML admin site for staff users

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use sqlx::PgPool;
use tracing::{info, warn};

use api::state::{AppState, MediaMount};
use domain::{
    AttributeRepository, IdGenerator, Ingredient, PasswordHasher, RecipeRepository, Tag,
    UserRepository, UuidGenerator,
};
use infrastructure::{
    attribute::{AttributeService, InMemoryAttributeRepository, PostgresAttributeRepository},
    auth::{JwtConfig, JwtGenerator, JwtService},
    recipe::{InMemoryRecipeRepository, LocalMediaStorage, PostgresRecipeRepository, RecipeService},
    storage::{connect_pool, run_migrations, PostgresConfig, StorageType},
    user::{Argon2Hasher, CreateUserRequest, InMemoryUserRepository, PostgresUserRepository, UserService},
};

/// The repositories behind every service, from one storage backend
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tags: Arc<dyn AttributeRepository<Tag>>,
    pub ingredients: Arc<dyn AttributeRepository<Ingredient>>,
    pub recipes: Arc<dyn RecipeRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            tags: Arc::new(InMemoryAttributeRepository::<Tag>::new()),
            ingredients: Arc::new(InMemoryAttributeRepository::<Ingredient>::new()),
            recipes: Arc::new(InMemoryRecipeRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            tags: Arc::new(PostgresAttributeRepository::<Tag>::new(pool.clone())),
            ingredients: Arc::new(PostgresAttributeRepository::<Ingredient>::new(pool.clone())),
            recipes: Arc::new(PostgresRecipeRepository::new(pool)),
        }
    }
}

/// Create the application state with the default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = StorageType::parse(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend '{}'", config.storage.backend)
    })?;

    info!(backend = ?backend, "Initializing storage");

    let repositories = match backend {
        StorageType::InMemory => Repositories::in_memory(),
        StorageType::Postgres => {
            let pool = connect_database(config).await?;
            let applied = run_migrations(&pool).await?;
            info!(applied, "Database schema is up to date");
            Repositories::postgres(pool)
        }
    };

    let state = build_app_state(
        config,
        repositories,
        Arc::new(Argon2Hasher::new()),
        Arc::new(UuidGenerator),
    )?;

    bootstrap_superuser(&state.user_service, config).await?;

    Ok(state)
}

/// Wire services and state on top of the given repositories
pub fn build_app_state(
    config: &AppConfig,
    repositories: Repositories,
    hasher: Arc<dyn PasswordHasher>,
    ids: Arc<dyn IdGenerator>,
) -> anyhow::Result<AppState> {
    let Repositories {
        users,
        tags,
        ingredients,
        recipes,
    } = repositories;

    let user_service = UserService::new(
        users,
        hasher,
        recipes.clone(),
        tags.clone(),
        ingredients.clone(),
    );
    let tag_service = AttributeService::<Tag>::new(tags, recipes.clone());
    let ingredient_service = AttributeService::<Ingredient>::new(ingredients, recipes.clone());

    let media_root = PathBuf::from(&config.media.root);
    let media = Arc::new(LocalMediaStorage::new(
        media_root.clone(),
        config.media.url_prefix.clone(),
    ));

    let recipe_service = RecipeService::new(
        recipes,
        tag_service.clone(),
        ingredient_service.clone(),
        media,
        ids,
    );

    let templates = api::admin::load_templates()
        .map_err(|e| anyhow::anyhow!("Failed to load admin templates: {}", e))?;

    Ok(AppState::new(
        Arc::new(user_service),
        Arc::new(tag_service),
        Arc::new(ingredient_service),
        Arc::new(recipe_service),
        create_jwt_service(config),
        Arc::new(templates),
        MediaMount {
            root: media_root,
            url_prefix: config.media.url_prefix.clone(),
        },
    ))
}

/// Connect to the configured PostgreSQL database
pub async fn connect_database(config: &AppConfig) -> anyhow::Result<PgPool> {
    let url = config.database_url().ok_or_else(|| {
        anyhow::anyhow!("storage.database_url or DATABASE_URL is required for the postgres backend")
    })?;

    let pool = connect_pool(
        &PostgresConfig::new(url).with_max_connections(config.storage.max_connections),
    )
    .await?;

    Ok(pool)
}

fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let hours = config.auth.jwt_expiration_hours;

    let jwt_config = match config.auth.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => JwtConfig::new(secret, hours),
        _ => {
            warn!("No JWT secret configured, using a random one; tokens will not survive a restart");
            JwtConfig::with_random_secret(hours)
        }
    };

    Arc::new(JwtService::new(jwt_config))
}

/// Generate a random password for a superuser created without one
pub(crate) fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Create the configured superuser when the user store is empty
async fn bootstrap_superuser(user_service: &UserService, config: &AppConfig) -> anyhow::Result<()> {
    let Some(email) = config.admin.email.as_deref() else {
        return Ok(());
    };

    if user_service.count().await? > 0 {
        return Ok(());
    }

    let (password, generated) = match config.admin.password.as_deref() {
        Some(p) if !p.is_empty() => (p.to_string(), false),
        _ => (generate_random_password(), true),
    };

    let user = user_service
        .create_superuser(CreateUserRequest::new(email, password.clone()))
        .await?;

    info!("===========================================");
    info!("Initial superuser created: {}", user.email());

    if generated {
        info!("Password: {}", password);
        info!("Please change this password after first login.");
    } else {
        info!("Password: (set via admin.password)");
    }

    info!("===========================================");

    Ok(())
}
