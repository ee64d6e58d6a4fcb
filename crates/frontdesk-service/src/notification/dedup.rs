//! Time-windowed duplicate detection.

use chrono::{DateTime, Duration, Utc};

use frontdesk_core::config::NotificationsConfig;
use frontdesk_core::result::AppResult;
use frontdesk_database::store::NotificationTransaction;
use frontdesk_entity::notification::DedupKey;

/// Decides whether an equivalent notification was recorded within the
/// trailing window.
///
/// This is a point-in-time query, not a reservation. Two concurrent calls
/// can both see no duplicate; the storage bucket constraint catches most
/// of those.
#[derive(Debug, Clone, Copy)]
pub struct NotificationDeduplicator {
    window: Duration,
}

impl NotificationDeduplicator {
    /// Creates a deduplicator with the given window.
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Creates a deduplicator from configuration.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::new(config.dedup_window())
    }

    /// The trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Earliest creation time that still counts as a duplicate at `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// Whether a notification with `key` exists inside the window ending
    /// at `now`, as seen by the transaction.
    pub async fn is_duplicate(
        &self,
        tx: &mut dyn NotificationTransaction,
        key: &DedupKey,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        tx.exists_since(key, self.window_start(now)).await
    }
}

impl Default for NotificationDeduplicator {
    fn default() -> Self {
        Self::from_config(&NotificationsConfig::default())
    }
}
