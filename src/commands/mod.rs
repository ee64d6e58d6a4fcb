//! CLI command definitions and dispatch.

pub mod dispatch;
pub mod id;
pub mod migrate;
pub mod notification;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use frontdesk_core::config::AppConfig;
use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;
use frontdesk_database::StoreManager;
use frontdesk_service::NotificationService;

/// Frontdesk in-app notification engine
#[derive(Debug, Parser)]
#[command(name = "frontdesk", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to apply on top of config/default.toml
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Dispatch domain events from a JSON file
    Dispatch(dispatch::DispatchArgs),
    /// List a recipient's notifications
    List(notification::ListArgs),
    /// Mark one notification as read
    Read(notification::ReadArgs),
    /// Mark all of a recipient's notifications as read
    ReadAll(notification::ScopeArgs),
    /// Encode a numeric identifier as a public token
    EncodeId(id::EncodeArgs),
    /// Decode a public token back to its identifier
    DecodeId(id::DecodeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Dispatch(args) => dispatch::execute(args, &config).await,
            Commands::List(args) => notification::list(args, &config).await,
            Commands::Read(args) => notification::read(args, &config).await,
            Commands::ReadAll(args) => notification::read_all(args, &config).await,
            Commands::EncodeId(args) => id::encode(args, &config),
            Commands::DecodeId(args) => id::decode(args, &config),
        }
    }
}

/// Helper: connect the configured storage backend
pub async fn connect_stores(config: &AppConfig) -> AppResult<StoreManager> {
    StoreManager::connect(&config.database, &config.notifications).await
}

/// Helper: build the notification service over the configured backend
pub async fn create_service(
    config: &AppConfig,
) -> AppResult<(StoreManager, Arc<NotificationService>)> {
    let stores = connect_stores(config).await?;
    let service = Arc::new(NotificationService::from_stores(
        &stores,
        &config.notifications,
    ));
    Ok((stores, service))
}
