//! In-memory notification store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;
use frontdesk_core::types::{NotificationId, PageRequest, PageResponse, TenantId, UserId};
use frontdesk_entity::notification::{DedupKey, Notification};

use crate::store::{NotificationFilter, NotificationStore, NotificationTransaction, dedup_bucket};

const NO_FAILURE: usize = usize::MAX;

/// Notification store kept in process memory.
///
/// A transaction holds the write lock from `begin` until it commits or
/// rolls back, so concurrent fan-out calls are serialized the way row
/// conflicts serialize them in PostgreSQL.
#[derive(Debug, Clone)]
pub struct MemoryNotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
    dedup_window: Duration,
    fail_insert_at: Arc<AtomicUsize>,
}

impl MemoryNotificationStore {
    /// Create an empty store. `dedup_window` sizes the uniqueness bucket.
    pub fn new(dedup_window: Duration) -> Self {
        Self {
            notifications: Arc::new(RwLock::new(Vec::new())),
            dedup_window,
            fail_insert_at: Arc::new(AtomicUsize::new(NO_FAILURE)),
        }
    }

    /// Make the insert after `succeeding` successful ones fail inside every
    /// subsequent transaction, simulating a storage outage mid-batch.
    pub fn fail_inserts_after(&self, succeeding: usize) {
        self.fail_insert_at.store(succeeding, Ordering::SeqCst);
    }

    /// Stop injecting insert failures.
    pub fn clear_insert_failure(&self) {
        self.fail_insert_at.store(NO_FAILURE, Ordering::SeqCst);
    }

    /// Every committed notification, in insertion order.
    pub async fn snapshot(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    fn scoped<'a>(
        notifications: &'a [Notification],
        tenant_id: TenantId,
        user_id: UserId,
    ) -> impl Iterator<Item = &'a Notification> {
        notifications
            .iter()
            .filter(move |n| n.belongs_to(tenant_id, user_id))
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn begin(&self) -> AppResult<Box<dyn NotificationTransaction>> {
        let guard = self.notifications.clone().write_owned().await;
        Ok(Box::new(MemoryNotificationTransaction {
            guard,
            pending: Vec::new(),
            dedup_window: self.dedup_window,
            fail_insert_at: self.fail_insert_at.load(Ordering::SeqCst),
        }))
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let mut notifications = self.notifications.write().await;
        Ok(notifications
            .iter_mut()
            .find(|n| n.id == id)
            .and_then(|n| n.mark_read(read_at).then(|| n.clone())))
    }

    async fn mark_all_read(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut notifications = self.notifications.write().await;
        let transitioned = notifications
            .iter_mut()
            .filter(|n| n.belongs_to(tenant_id, user_id))
            .filter_map(|n| n.mark_read(read_at).then_some(()))
            .count();
        Ok(transitioned as u64)
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let notifications = self.notifications.read().await;
        let mut matching: Vec<&Notification> = Self::scoped(&notifications, tenant_id, user_id)
            .filter(|n| filter.matches(n))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count_unread(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<u64> {
        let notifications = self.notifications.read().await;
        Ok(Self::scoped(&notifications, tenant_id, user_id)
            .filter(|n| n.is_unread())
            .count() as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Buffered inserts applied to the store on commit.
pub struct MemoryNotificationTransaction {
    guard: OwnedRwLockWriteGuard<Vec<Notification>>,
    pending: Vec<Notification>,
    dedup_window: Duration,
    fail_insert_at: usize,
}

impl MemoryNotificationTransaction {
    fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.guard.iter().chain(self.pending.iter())
    }
}

#[async_trait]
impl NotificationTransaction for MemoryNotificationTransaction {
    async fn exists_since(&mut self, key: &DedupKey, since: DateTime<Utc>) -> AppResult<bool> {
        Ok(self
            .visible()
            .any(|n| n.dedup_key() == *key && n.created_at >= since))
    }

    async fn insert(&mut self, notification: &Notification) -> AppResult<bool> {
        if self.pending.len() >= self.fail_insert_at {
            return Err(AppError::database("Storage unavailable"));
        }

        let key = notification.dedup_key();
        let bucket = dedup_bucket(notification.created_at, self.dedup_window);
        let collides = self.visible().any(|n| {
            n.dedup_key() == key && dedup_bucket(n.created_at, self.dedup_window) == bucket
        });
        if collides {
            return Ok(false);
        }

        self.pending.push(notification.clone());
        Ok(true)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let Self {
            mut guard, pending, ..
        } = *self;
        guard.extend(pending);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_entity::notification::{EntityType, EventType, NotificationContent};
    use uuid::Uuid;

    fn key(tenant_id: TenantId, user_id: UserId) -> DedupKey {
        DedupKey {
            tenant_id,
            user_id,
            event_type: EventType::MeetingReminder,
            entity_type: EntityType::Meeting,
            entity_id: Uuid::new_v4(),
        }
    }

    fn content() -> NotificationContent {
        NotificationContent {
            deep_link: "/calendar/meetings/1".to_string(),
            title: "Meeting Reminder".to_string(),
            message: "'Morning briefing' is starting soon".to_string(),
            context: None,
        }
    }

    fn store() -> MemoryNotificationStore {
        MemoryNotificationStore::new(Duration::minutes(5))
    }

    #[tokio::test]
    async fn test_commit_makes_inserts_visible() {
        let store = store();
        let key = key(TenantId::new(), UserId::new());

        let mut tx = store.begin().await.unwrap();
        assert!(tx.insert(&Notification::new(key, &content(), Utc::now())).await.unwrap());
        tx.commit().await.unwrap();

        assert_eq!(store.count_unread(key.tenant_id, key.user_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_inserts() {
        let store = store();
        let key = key(TenantId::new(), UserId::new());

        let mut tx = store.begin().await.unwrap();
        tx.insert(&Notification::new(key, &content(), Utc::now()))
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_bucket_collision_is_skipped() {
        let store = store();
        let key = key(TenantId::new(), UserId::new());
        let now = Utc::now();

        let mut tx = store.begin().await.unwrap();
        assert!(tx.insert(&Notification::new(key, &content(), now)).await.unwrap());
        assert!(!tx.insert(&Notification::new(key, &content(), now)).await.unwrap());
        tx.commit().await.unwrap();

        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_pending_insert_is_seen_by_exists_since() {
        let store = store();
        let key = key(TenantId::new(), UserId::new());
        let now = Utc::now();

        let mut tx = store.begin().await.unwrap();
        assert!(!tx.exists_since(&key, now - Duration::minutes(5)).await.unwrap());
        tx.insert(&Notification::new(key, &content(), now)).await.unwrap();
        assert!(tx.exists_since(&key, now - Duration::minutes(5)).await.unwrap());
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = store();
        store.fail_inserts_after(1);
        let tenant_id = TenantId::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert(&Notification::new(key(tenant_id, UserId::new()), &content(), Utc::now()))
            .await
            .unwrap();
        let err = tx
            .insert(&Notification::new(key(tenant_id, UserId::new()), &content(), Utc::now()))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        tx.rollback().await.unwrap();

        store.clear_insert_failure();
        let mut tx = store.begin().await.unwrap();
        tx.insert(&Notification::new(key(tenant_id, UserId::new()), &content(), Utc::now()))
            .await
            .unwrap();
        tx.insert(&Notification::new(key(tenant_id, UserId::new()), &content(), Utc::now()))
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mark_read_only_transitions_once() {
        let store = store();
        let key = key(TenantId::new(), UserId::new());
        let notification = Notification::new(key, &content(), Utc::now());
        let id = notification.id;

        let mut tx = store.begin().await.unwrap();
        tx.insert(&notification).await.unwrap();
        tx.commit().await.unwrap();

        let first = store.mark_read(id, Utc::now()).await.unwrap();
        assert!(first.is_some_and(|n| n.is_read));
        assert!(store.mark_read(id, Utc::now()).await.unwrap().is_none());
        assert!(store.mark_read(NotificationId::new(), Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let store = store();
        let tenant_id = TenantId::new();
        let user_id = UserId::new();
        let now = Utc::now();

        let mut tx = store.begin().await.unwrap();
        let older = Notification::new(key(tenant_id, user_id), &content(), now - Duration::hours(1));
        let newer = Notification::new(key(tenant_id, user_id), &content(), now);
        let other = Notification::new(key(TenantId::new(), user_id), &content(), now);
        for n in [&older, &newer, &other] {
            tx.insert(n).await.unwrap();
        }
        tx.commit().await.unwrap();

        let page = store
            .list(tenant_id, user_id, &NotificationFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].id, newer.id);
        assert_eq!(page.items[1].id, older.id);
    }
}
