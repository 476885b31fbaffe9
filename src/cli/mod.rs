//! CLI module for the Recipe App API
//!
//! Provides subcommands for running and administering the service:
//! - `serve`: HTTP server (default)
//! - `migrate`: apply or revert PostgreSQL schema migrations
//! - `create-superuser`: create a staff superuser account

pub mod migrate;
pub mod serve;
pub mod superuser;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Recipe App API - recipes, tags and ingredients over HTTP
#[derive(Parser)]
#[command(name = "recipe-app-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),

    /// Create a staff superuser
    CreateSuperuser(SuperuserArgs),
}

#[derive(Args, Debug)]
pub struct SuperuserArgs {
    /// Email address of the new superuser
    #[arg(long)]
    pub email: String,

    /// Password; a random one is generated and printed when omitted
    #[arg(long)]
    pub password: Option<String>,

    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,
}

/// Load the configuration and install the global subscriber
pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["recipe-app-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["recipe-app-api", "migrate", "--revert"]).unwrap();

        match cli.command {
            Some(Command::Migrate(args)) => assert!(args.revert),
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_parse_create_superuser() {
        let cli = Cli::try_parse_from([
            "recipe-app-api",
            "create-superuser",
            "--email",
            "admin@example.com",
        ])
        .unwrap();

        match cli.command {
            Some(Command::CreateSuperuser(args)) => {
                assert_eq!(args.email, "admin@example.com");
                assert!(args.password.is_none());
                assert_eq!(args.name, "");
            }
            _ => panic!("expected create-superuser"),
        }
    }

    #[test]
    fn test_create_superuser_requires_email() {
        assert!(Cli::try_parse_from(["recipe-app-api", "create-superuser"]).is_err());
    }
}
