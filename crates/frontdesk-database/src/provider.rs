//! Storage manager that selects the configured backend.

use std::sync::Arc;

use tracing::info;

use frontdesk_core::config::{DatabaseConfig, NotificationsConfig};
use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryDirectory, MemoryNotificationStore};
use crate::postgres::{PgDirectory, PgNotificationStore};
use crate::store::{Directory, NotificationStore};

/// Holds the notification store and directory of the configured backend.
#[derive(Debug, Clone)]
pub struct StoreManager {
    notifications: Arc<dyn NotificationStore>,
    directory: Arc<dyn Directory>,
    pool: Option<DatabasePool>,
}

impl StoreManager {
    /// Connect to the backend named by `database.provider`.
    pub async fn connect(
        database: &DatabaseConfig,
        notifications: &NotificationsConfig,
    ) -> AppResult<Self> {
        let window = notifications.dedup_window();
        match database.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL notification store");
                let pool = DatabasePool::connect(database).await?;
                Ok(Self {
                    notifications: Arc::new(PgNotificationStore::new(pool.pool().clone(), window)),
                    directory: Arc::new(PgDirectory::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Initializing in-memory notification store");
                Ok(Self::from_stores(
                    Arc::new(MemoryNotificationStore::new(window)),
                    Arc::new(MemoryDirectory::new()),
                ))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Build a manager from existing stores (for testing and embedding).
    pub fn from_stores(
        notifications: Arc<dyn NotificationStore>,
        directory: Arc<dyn Directory>,
    ) -> Self {
        Self {
            notifications,
            directory,
            pool: None,
        }
    }

    /// The notification store.
    pub fn notifications(&self) -> Arc<dyn NotificationStore> {
        Arc::clone(&self.notifications)
    }

    /// The tenant and user directory.
    pub fn directory(&self) -> Arc<dyn Directory> {
        Arc::clone(&self.directory)
    }

    /// The PostgreSQL pool, when that backend is active.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::error::ErrorKind;

    #[tokio::test]
    async fn test_memory_provider() {
        let manager = StoreManager::connect(&DatabaseConfig::memory(), &NotificationsConfig::default())
            .await
            .unwrap();
        assert!(manager.pool().is_none());
        assert!(manager.notifications().health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = DatabaseConfig {
            provider: "mongodb".to_string(),
            ..DatabaseConfig::default()
        };
        let err = StoreManager::connect(&config, &NotificationsConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
