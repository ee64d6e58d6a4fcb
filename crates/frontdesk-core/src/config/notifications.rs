//! Notification fan-out configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Longest accepted deduplication window: 30 days.
pub const MAX_DEDUP_WINDOW_MINUTES: u64 = 30 * 24 * 60;

/// Settings for the fan-out engine and its deduplication checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Trailing window in minutes within which an identical
    /// (tenant, recipient, event type, entity type, entity) notification
    /// is suppressed. Process-wide, not per event type.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_minutes: u64,
    /// Buffer size of the creation signal channel.
    #[serde(default = "default_signal_buffer")]
    pub signal_buffer_size: usize,
    /// Page size used when a listing query does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

impl NotificationsConfig {
    /// The deduplication window as a duration, clamped to
    /// `1..=MAX_DEDUP_WINDOW_MINUTES` minutes.
    pub fn dedup_window(&self) -> Duration {
        let minutes = self
            .dedup_window_minutes
            .clamp(1, MAX_DEDUP_WINDOW_MINUTES);
        i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or_else(|| Duration::minutes(default_dedup_window() as i64))
    }

    /// Reject values the fan-out engine cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.dedup_window_minutes > MAX_DEDUP_WINDOW_MINUTES {
            return Err(AppError::configuration(format!(
                "notifications.dedup_window_minutes must be at most {MAX_DEDUP_WINDOW_MINUTES}, got {}",
                self.dedup_window_minutes
            )));
        }
        if self.signal_buffer_size == 0 {
            return Err(AppError::configuration(
                "notifications.signal_buffer_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dedup_window_minutes: default_dedup_window(),
            signal_buffer_size: default_signal_buffer(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_dedup_window() -> u64 {
    5
}

fn default_signal_buffer() -> usize {
    256
}

fn default_page_size() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_window_is_clamped() {
        let mut config = NotificationsConfig::default();
        assert_eq!(config.dedup_window(), Duration::minutes(5));

        config.dedup_window_minutes = 0;
        assert_eq!(config.dedup_window(), Duration::minutes(1));

        config.dedup_window_minutes = u64::MAX;
        assert_eq!(
            config.dedup_window(),
            Duration::minutes(MAX_DEDUP_WINDOW_MINUTES as i64)
        );
    }

    #[test]
    fn test_validate_rejects_oversized_window() {
        let config = NotificationsConfig {
            dedup_window_minutes: 1 << 60,
            ..NotificationsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);

        assert!(NotificationsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_signal_buffer() {
        let config = NotificationsConfig {
            signal_buffer_size: 0,
            ..NotificationsConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err().kind,
            ErrorKind::Configuration
        );
    }
}
