//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults when absent.

pub mod database;
pub mod logging;
pub mod notifications;
pub mod sqids;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationsConfig;
pub use self::sqids::SqidsConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage backend settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Fan-out and deduplication settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Public identifier codec settings.
    #[serde(default)]
    pub sqids: SqidsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `FRONTDESK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FRONTDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field and range constraints serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.notifications.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_source() {
        let config: AppConfig = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("empty config should deserialize");

        assert_eq!(config.notifications.dedup_window_minutes, 5);
        assert_eq!(config.database.provider, "postgres");
        assert_eq!(config.sqids.min_length, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_override_dedup_window() {
        let config: AppConfig = config::Config::builder()
            .set_override("notifications.dedup_window_minutes", 15)
            .expect("override")
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("config should deserialize");

        assert_eq!(config.notifications.dedup_window_minutes, 15);
        assert_eq!(config.notifications.dedup_window().num_minutes(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_dedup_window_is_rejected() {
        let config: AppConfig = config::Config::builder()
            .set_override("notifications.dedup_window_minutes", 1_i64 << 60)
            .expect("override")
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("config should deserialize");

        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
