//! Database migration command.

use frontdesk_core::config::AppConfig;
use frontdesk_core::error::AppError;

use crate::output;

/// Run all pending migrations
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let stores = super::connect_stores(config).await?;
    let pool = stores.pool().ok_or_else(|| {
        AppError::configuration(format!(
            "Migrations require the postgres provider, not '{}'",
            config.database.provider
        ))
    })?;

    tracing::info!("Running database migrations...");
    frontdesk_database::migration::run_migrations(pool).await?;
    output::print_success("All migrations applied successfully.");

    pool.close().await;
    Ok(())
}
