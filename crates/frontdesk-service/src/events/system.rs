//! Tenant-wide alert handler.

use std::sync::Arc;

use async_trait::async_trait;

use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;
use frontdesk_database::store::Directory;
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;
use frontdesk_entity::source::SourceEntity;

use super::{EventHandler, unexpected_event};
use crate::notification::{NotificationRequest, NotificationService, SYSTEM_ALERTS_PATH};

/// Notifies every user of the tenant holding one of the target roles.
///
/// The tenant itself is the source entity.
#[derive(Debug, Clone)]
pub struct SystemAlertHandler {
    service: Arc<NotificationService>,
    directory: Arc<dyn Directory>,
}

impl SystemAlertHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>, directory: Arc<dyn Directory>) -> Self {
        Self { service, directory }
    }
}

#[async_trait]
impl EventHandler for SystemAlertHandler {
    fn kind(&self) -> EventType {
        EventType::SystemAlert
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::SystemAlertBroadcast {
            tenant_id,
            title,
            message,
            target_roles,
            sender,
        } = event
        else {
            return Err(unexpected_event(self.kind(), event));
        };

        let tenant = self
            .directory
            .find_tenant(*tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))?;

        let recipients = self
            .directory
            .find_users_by_roles(tenant.id, target_roles)
            .await?;

        let request = NotificationRequest::new(
            tenant.id,
            recipients,
            self.kind(),
            SourceEntity::from(&tenant),
            title.clone(),
            message.clone(),
        )
        .with_deep_link(SYSTEM_ALERTS_PATH)
        .with_actor(*sender);

        self.service.notify(request).await
    }
}
