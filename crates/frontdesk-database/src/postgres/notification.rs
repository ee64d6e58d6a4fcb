//! PostgreSQL notification store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use frontdesk_core::error::{AppError, ErrorKind};
use frontdesk_core::result::AppResult;
use frontdesk_core::types::{NotificationId, PageRequest, PageResponse, TenantId, UserId};
use frontdesk_entity::notification::{DedupKey, Notification};

use crate::store::{NotificationFilter, NotificationStore, NotificationTransaction, dedup_bucket};

const COLUMNS: &str = "id, tenant_id, user_id, event_type, entity_type, entity_id, deep_link, \
                       title, message, context, is_read, read_at, created_at";

/// Notification store backed by the `notifications` table.
#[derive(Debug, Clone)]
pub struct PgNotificationStore {
    pool: PgPool,
    dedup_window: Duration,
}

impl PgNotificationStore {
    /// Create a new store. `dedup_window` sizes the uniqueness bucket.
    pub fn new(pool: PgPool, dedup_window: Duration) -> Self {
        Self { pool, dedup_window }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn begin(&self) -> AppResult<Box<dyn NotificationTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgNotificationTransaction {
            tx,
            dedup_window: self.dedup_window,
        }))
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notification", e))
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 \
             WHERE id = $1 AND is_read = FALSE RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(read_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))
    }

    async fn mark_all_read(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $3 \
             WHERE tenant_id = $1 AND user_id = $2 AND is_read = FALSE",
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE tenant_id = $1 AND user_id = $2 \
             AND ($3::boolean IS NULL OR is_read = $3) \
             AND ($4::notification_event_type IS NULL OR event_type = $4)",
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(filter.is_read)
        .bind(filter.event_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let items = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE tenant_id = $1 AND user_id = $2 \
             AND ($3::boolean IS NULL OR is_read = $3) \
             AND ($4::notification_event_type IS NULL OR event_type = $4) \
             ORDER BY created_at DESC, id DESC LIMIT $5 OFFSET $6"
        ))
        .bind(tenant_id)
        .bind(user_id)
        .bind(filter.is_read)
        .bind(filter.event_type)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn count_unread(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE tenant_id = $1 AND user_id = $2 AND is_read = FALSE",
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// One fan-out call's database transaction.
pub struct PgNotificationTransaction {
    tx: Transaction<'static, Postgres>,
    dedup_window: Duration,
}

#[async_trait]
impl NotificationTransaction for PgNotificationTransaction {
    async fn exists_since(&mut self, key: &DedupKey, since: DateTime<Utc>) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM notifications \
             WHERE tenant_id = $1 AND user_id = $2 AND event_type = $3 \
             AND entity_type = $4 AND entity_id = $5 AND created_at >= $6)",
        )
        .bind(key.tenant_id)
        .bind(key.user_id)
        .bind(key.event_type)
        .bind(key.entity_type)
        .bind(key.entity_id)
        .bind(since)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check duplicates", e))
    }

    async fn insert(&mut self, notification: &Notification) -> AppResult<bool> {
        let inserted = sqlx::query_scalar::<_, NotificationId>(
            "INSERT INTO notifications (id, tenant_id, user_id, event_type, entity_type, \
             entity_id, deep_link, title, message, context, is_read, read_at, created_at, \
             dedup_bucket) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (tenant_id, user_id, event_type, entity_type, entity_id, dedup_bucket) \
             DO NOTHING RETURNING id",
        )
        .bind(notification.id)
        .bind(notification.tenant_id)
        .bind(notification.user_id)
        .bind(notification.event_type)
        .bind(notification.entity_type)
        .bind(notification.entity_id)
        .bind(&notification.deep_link)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.context)
        .bind(notification.is_read)
        .bind(notification.read_at)
        .bind(notification.created_at)
        .bind(dedup_bucket(notification.created_at, self.dedup_window))
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notification", e)
        })?;

        Ok(inserted.is_some())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })
    }
}
