//! Schema migrations for the PostgreSQL backend.

use tracing::info;

use frontdesk_core::error::{AppError, ErrorKind};
use frontdesk_core::result::AppResult;

use crate::connection::DatabasePool;

/// Apply every pending migration from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &DatabasePool) -> AppResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool.pool())
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed");
    Ok(())
}
