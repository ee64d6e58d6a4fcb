//! Storage traits for notifications and the tenant/user directory.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use frontdesk_core::result::AppResult;
use frontdesk_core::types::{NotificationId, PageRequest, PageResponse, TenantId, UserId};
use frontdesk_entity::notification::{DedupKey, EventType, Notification};
use frontdesk_entity::tenant::Tenant;
use frontdesk_entity::user::{User, UserRole};

/// Optional listing filters. Tenant and recipient scope is always applied
/// separately and cannot be expressed here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Only read (`true`) or only unread (`false`) notifications.
    #[serde(default)]
    pub is_read: Option<bool>,
    /// Only notifications of this event type.
    #[serde(default)]
    pub event_type: Option<EventType>,
}

impl NotificationFilter {
    /// Whether a notification passes the filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        self.is_read.is_none_or(|is_read| notification.is_read == is_read)
            && self
                .event_type
                .is_none_or(|event_type| notification.event_type == event_type)
    }
}

/// Time bucket used by the storage uniqueness constraint on the dedup key.
pub fn dedup_bucket(created_at: DateTime<Utc>, window: Duration) -> i64 {
    created_at
        .timestamp()
        .div_euclid(window.num_seconds().max(1))
}

/// Persistent notification storage.
///
/// Creation only happens through a [`NotificationTransaction`]; the
/// methods here cover read-state transitions and scoped reads.
#[async_trait]
pub trait NotificationStore: Send + Sync + fmt::Debug + 'static {
    /// Open a unit of work for one fan-out call.
    async fn begin(&self) -> AppResult<Box<dyn NotificationTransaction>>;

    /// Fetch a notification by id, regardless of scope.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// Transition one notification to read if it is still unread.
    ///
    /// Returns the updated record, or `None` when nothing changed (already
    /// read, or unknown id).
    async fn mark_read(
        &self,
        id: NotificationId,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Transition every unread notification of one recipient in one tenant
    /// to read with the same timestamp. Returns the number transitioned.
    async fn mark_all_read(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// List notifications for one recipient in one tenant, newest first.
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count unread notifications for one recipient in one tenant.
    async fn count_unread(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<u64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// An open unit of work. Either every insert commits or none does.
#[async_trait]
pub trait NotificationTransaction: Send {
    /// Whether a notification with this key was created at or after `since`.
    async fn exists_since(&mut self, key: &DedupKey, since: DateTime<Utc>) -> AppResult<bool>;

    /// Insert a notification.
    ///
    /// Returns `false` without error when the record collides with an
    /// existing one on the dedup key and time bucket.
    async fn insert(&mut self, notification: &Notification) -> AppResult<bool>;

    /// Make every insert durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard every insert.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Read-only view of tenants and their users.
#[async_trait]
pub trait Directory: Send + Sync + fmt::Debug + 'static {
    /// Find a tenant by id.
    async fn find_tenant(&self, id: TenantId) -> AppResult<Option<Tenant>>;

    /// Resolve user ids inside one tenant. Unknown ids and users of other
    /// tenants are absent from the result.
    async fn find_users(&self, tenant_id: TenantId, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Every user of the tenant holding one of the roles.
    async fn find_users_by_roles(
        &self,
        tenant_id: TenantId,
        roles: &[UserRole],
    ) -> AppResult<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_dedup_bucket_boundaries() {
        let window = Duration::minutes(5);
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            dedup_bucket(start, window),
            dedup_bucket(start + Duration::seconds(299), window)
        );
        assert_ne!(
            dedup_bucket(start, window),
            dedup_bucket(start + Duration::seconds(300), window)
        );
    }

    #[test]
    fn test_filter_default_matches_everything() {
        let filter = NotificationFilter::default();
        assert!(filter.is_read.is_none());
        assert!(filter.event_type.is_none());
    }
}
