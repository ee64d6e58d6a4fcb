//! Notification fan-out, read-state transitions, and scoped listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use frontdesk_core::config::NotificationsConfig;
use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;
use frontdesk_core::types::{NotificationId, PageRequest, PageResponse};
use frontdesk_database::StoreManager;
use frontdesk_database::store::{Directory, NotificationFilter, NotificationStore, NotificationTransaction};
use frontdesk_entity::notification::{
    DedupKey, EntityType, EventType, Notification, NotificationContent,
};
use frontdesk_entity::user::User;

use super::dedup::NotificationDeduplicator;
use super::deep_link::DeepLinkResolver;
use super::request::NotificationRequest;
use super::signal::NotificationSignals;
use crate::context::RequestContext;

/// One page of a recipient's notifications plus their unread count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    /// The requested page.
    pub page: PageResponse<Notification>,
    /// Unread notifications in the same tenant and recipient scope.
    pub unread_count: u64,
}

/// The single entry point for creating notifications, and the only
/// mutator of their read state.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification storage.
    store: Arc<dyn NotificationStore>,
    /// Tenant and user lookups.
    directory: Arc<dyn Directory>,
    /// Window-based duplicate detection.
    deduplicator: NotificationDeduplicator,
    /// Entity-type and deep-link mapping.
    resolver: DeepLinkResolver,
    /// Creation signals.
    signals: NotificationSignals,
    /// Page size used when a listing does not ask for one.
    default_page_size: u64,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        directory: Arc<dyn Directory>,
        config: &NotificationsConfig,
    ) -> Self {
        Self {
            store,
            directory,
            deduplicator: NotificationDeduplicator::from_config(config),
            resolver: DeepLinkResolver::new(),
            signals: NotificationSignals::new(config.signal_buffer_size),
            default_page_size: config.default_page_size,
        }
    }

    /// Creates a service over the stores of a [`StoreManager`].
    pub fn from_stores(stores: &StoreManager, config: &NotificationsConfig) -> Self {
        Self::new(stores.notifications(), stores.directory(), config)
    }

    /// The creation signal channel.
    pub fn signals(&self) -> &NotificationSignals {
        &self.signals
    }

    /// Fans one event out to its recipients. Returns how many notifications
    /// were created.
    ///
    /// The actor is removed before anything else happens to the recipient
    /// set. Duplicates inside the window and unresolvable recipients are
    /// skipped without error. Every insert of the call commits together or
    /// not at all; signals go out only after the commit.
    pub async fn notify(&self, request: NotificationRequest) -> AppResult<u64> {
        let NotificationRequest {
            tenant_id,
            recipients,
            event_type,
            source,
            title,
            message,
            deep_link,
            context,
            actor,
        } = request;

        let tenant = self
            .directory
            .find_tenant(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))?;

        let recipients = recipients.resolve(tenant.id, self.directory.as_ref()).await?;

        let entity_type = self.resolver.resolve_entity_type(&source);
        let content = NotificationContent {
            deep_link: deep_link.unwrap_or_else(|| self.resolver.resolve(&source)),
            title,
            message,
            context,
        };

        let recipients: Vec<User> = match actor {
            Some(actor) => recipients
                .into_iter()
                .filter(|user| user.id != actor)
                .collect(),
            None => recipients,
        };

        if recipients.is_empty() {
            debug!(
                tenant_id = %tenant.id,
                event_type = %event_type,
                entity_id = %source.id,
                "No recipients left to notify"
            );
            return Ok(0);
        }

        let mut tx = self.store.begin().await?;
        let persisted = self
            .persist(
                tx.as_mut(),
                &recipients,
                event_type,
                entity_type,
                source.id,
                &content,
                Utc::now(),
            )
            .await;

        let created = match persisted {
            Ok(created) => created,
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Failed to roll back notification batch");
                }
                warn!(
                    tenant_id = %tenant.id,
                    event_type = %event_type,
                    error = %e,
                    "Notification batch aborted"
                );
                return Err(e);
            }
        };
        tx.commit().await?;

        let count = created.len() as u64;
        for notification in created {
            self.signals.emit(notification);
        }

        info!(
            tenant_id = %tenant.id,
            event_type = %event_type,
            entity_id = %source.id,
            created = count,
            "Notifications created"
        );

        Ok(count)
    }

    #[allow(clippy::too_many_arguments)]
    async fn persist(
        &self,
        tx: &mut dyn NotificationTransaction,
        recipients: &[User],
        event_type: EventType,
        entity_type: EntityType,
        entity_id: Uuid,
        content: &NotificationContent,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Notification>> {
        let mut created = Vec::with_capacity(recipients.len());

        for recipient in recipients {
            let key = DedupKey {
                tenant_id: recipient.tenant_id,
                user_id: recipient.id,
                event_type,
                entity_type,
                entity_id,
            };

            if self.deduplicator.is_duplicate(&mut *tx, &key, now).await? {
                debug!(
                    tenant_id = %key.tenant_id,
                    user_id = %key.user_id,
                    event_type = %event_type,
                    entity_id = %key.entity_id,
                    "Notification deduplicated"
                );
                continue;
            }

            let notification = Notification::new(key, content, now);
            if !tx.insert(&notification).await? {
                debug!(
                    tenant_id = %key.tenant_id,
                    user_id = %key.user_id,
                    event_type = %event_type,
                    entity_id = %key.entity_id,
                    "Notification deduplicated by storage bucket"
                );
                continue;
            }

            created.push(notification);
        }

        Ok(created)
    }

    /// Marks one notification as read.
    ///
    /// Fails with `NotFound` for an unknown id and with `Authorization`
    /// when the notification belongs to another tenant or recipient.
    /// Marking an already-read notification returns it unchanged.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> AppResult<Notification> {
        let notification = self
            .store
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Notification {notification_id} not found"))
            })?;

        if !notification.belongs_to(ctx.tenant_id, ctx.user_id) {
            warn!(
                tenant_id = %ctx.tenant_id,
                user_id = %ctx.user_id,
                notification_id = %notification_id,
                "Rejected read-state change outside caller scope"
            );
            return Err(AppError::authorization(
                "Notification does not belong to the caller",
            ));
        }

        if notification.is_read {
            return Ok(notification);
        }

        match self.store.mark_read(notification_id, Utc::now()).await? {
            Some(updated) => Ok(updated),
            // Another caller won the transition; report its timestamp.
            None => self.store.find_by_id(notification_id).await?.ok_or_else(|| {
                AppError::not_found(format!("Notification {notification_id} not found"))
            }),
        }
    }

    /// Marks every unread notification of the caller as read with one
    /// shared timestamp. Returns how many changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let count = self
            .store
            .mark_all_read(ctx.tenant_id, ctx.user_id, Utc::now())
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            user_id = %ctx.user_id,
            count,
            "Marked all notifications read"
        );
        Ok(count)
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        filter: NotificationFilter,
        page: Option<PageRequest>,
    ) -> AppResult<NotificationPage> {
        let page = page.unwrap_or_else(|| PageRequest::new(1, self.default_page_size));
        let page = PageRequest::new(page.page, page.page_size);

        let items = self
            .store
            .list(ctx.tenant_id, ctx.user_id, &filter, &page)
            .await?;
        let unread_count = self.unread_count(ctx).await?;

        Ok(NotificationPage {
            page: items,
            unread_count,
        })
    }

    /// Counts the caller's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.count_unread(ctx.tenant_id, ctx.user_id).await
    }
}
