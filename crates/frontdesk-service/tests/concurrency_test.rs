//! Integration tests for overlapping fan-out calls on one dedup key.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use frontdesk_core::config::NotificationsConfig;
use frontdesk_core::result::AppResult;
use frontdesk_core::types::{NotificationId, PageRequest, PageResponse, TenantId, UserId};
use frontdesk_database::memory::MemoryNotificationStore;
use frontdesk_database::store::{NotificationFilter, NotificationStore, NotificationTransaction};
use frontdesk_entity::notification::{DedupKey, EventType, Notification};
use frontdesk_entity::source::{SourceEntity, SourceKind};
use frontdesk_entity::user::UserRole;
use frontdesk_service::{NotificationRequest, NotificationService};

/// Store whose window check never sees earlier records, the way a
/// concurrent uncommitted writer is invisible under read committed.
#[derive(Debug)]
struct UncommittedPeerStore {
    inner: MemoryNotificationStore,
}

struct UncommittedPeerTransaction {
    inner: Box<dyn NotificationTransaction>,
}

#[async_trait]
impl NotificationTransaction for UncommittedPeerTransaction {
    async fn exists_since(&mut self, _key: &DedupKey, _since: DateTime<Utc>) -> AppResult<bool> {
        Ok(false)
    }

    async fn insert(&mut self, notification: &Notification) -> AppResult<bool> {
        self.inner.insert(notification).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.inner.rollback().await
    }
}

#[async_trait]
impl NotificationStore for UncommittedPeerStore {
    async fn begin(&self) -> AppResult<Box<dyn NotificationTransaction>> {
        Ok(Box::new(UncommittedPeerTransaction {
            inner: self.inner.begin().await?,
        }))
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        self.inner.find_by_id(id).await
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        self.inner.mark_read(id, read_at).await
    }

    async fn mark_all_read(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.inner.mark_all_read(tenant_id, user_id, read_at).await
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.inner.list(tenant_id, user_id, filter, page).await
    }

    async fn count_unread(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<u64> {
        self.inner.count_unread(tenant_id, user_id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

/// A day-long window, so a bucket boundary almost never splits a test.
fn day_window() -> NotificationsConfig {
    NotificationsConfig {
        dedup_window_minutes: 24 * 60,
        ..NotificationsConfig::default()
    }
}

fn meeting_request(
    app: &helpers::TestApp,
    recipient: UserId,
    source: &SourceEntity,
) -> NotificationRequest {
    NotificationRequest::new(
        app.tenant.id,
        recipient,
        EventType::MeetingReminder,
        source.clone(),
        "Meeting Reminder",
        "'Morning briefing' is starting soon",
    )
}

#[tokio::test]
async fn test_bucket_collision_is_skipped_and_not_counted() {
    let app = helpers::TestApp::with_config(day_window()).await;
    let a = app.create_user("Ana", UserRole::Staff).await;
    let b = app.create_user("Bruno", UserRole::Staff).await;
    let source = SourceEntity::new(SourceKind::Meeting, Uuid::new_v4(), app.tenant.id);

    assert_eq!(
        app.service
            .notify(meeting_request(&app, a.id, &source))
            .await
            .unwrap(),
        1
    );

    let config = day_window();
    let blind = NotificationService::new(
        Arc::new(UncommittedPeerStore {
            inner: app.store.clone(),
        }),
        Arc::new(app.directory.clone()),
        &config,
    );
    let mut signals = blind.signals().subscribe();

    let request = NotificationRequest::new(
        app.tenant.id,
        vec![a.id, b.id],
        EventType::MeetingReminder,
        source.clone(),
        "Meeting Reminder",
        "'Morning briefing' is starting soon",
    );
    let created = blind.notify(request).await.unwrap();

    assert_eq!(created, 1);
    let stored = app.store.snapshot().await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.iter().filter(|n| n.user_id == a.id).count(), 1);

    let signal = signals.try_recv().unwrap();
    assert_eq!(signal.notification.user_id, b.id);
    assert!(signals.try_recv().is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_notify_creates_one_record() {
    let app = helpers::TestApp::new().await;
    let staff = app.create_user("Sofia", UserRole::Staff).await;
    let source = SourceEntity::new(SourceKind::Meeting, Uuid::new_v4(), app.tenant.id);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&app.service);
        let request = meeting_request(&app, staff.id, &source);
        handles.push(tokio::spawn(async move { service.notify(request).await }));
    }

    let mut total = 0;
    for handle in handles {
        total += handle.await.unwrap().unwrap();
    }

    assert_eq!(total, 1);
    let stored = app.store.snapshot().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, staff.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_notify_without_window_check_creates_one_record() {
    let app = helpers::TestApp::with_config(day_window()).await;
    let staff = app.create_user("Sofia", UserRole::Staff).await;
    let source = SourceEntity::new(SourceKind::Meeting, Uuid::new_v4(), app.tenant.id);

    let service = Arc::new(NotificationService::new(
        Arc::new(UncommittedPeerStore {
            inner: app.store.clone(),
        }),
        Arc::new(app.directory.clone()),
        &day_window(),
    ));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&service);
        let request = meeting_request(&app, staff.id, &source);
        handles.push(tokio::spawn(async move { service.notify(request).await }));
    }

    let mut total = 0;
    for handle in handles {
        total += handle.await.unwrap().unwrap();
    }

    assert_eq!(total, 1);
    assert_eq!(app.store.snapshot().await.len(), 1);
}
