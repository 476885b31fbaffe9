//! Create-superuser command

use tracing::{info, warn};

use super::SuperuserArgs;
use crate::infrastructure::storage::StorageType;
use crate::infrastructure::user::CreateUserRequest;

pub async fn run(args: SuperuserArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;

    if StorageType::parse(&config.storage.backend) == Some(StorageType::InMemory) {
        warn!("Storage backend is in-memory; the superuser is lost when this command exits");
    }

    let state = crate::create_app_state_with_config(&config).await?;

    let (password, generated) = match args.password {
        Some(password) => (password, false),
        None => (crate::generate_random_password(), true),
    };

    let user = state
        .user_service
        .create_superuser(CreateUserRequest::new(args.email, password.clone()).with_name(args.name))
        .await?;

    info!(id = %user.id(), email = %user.email(), "Superuser created");

    if generated {
        println!("Generated password: {}", password);
    }

    Ok(())
}
