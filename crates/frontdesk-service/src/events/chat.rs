//! Chat mention handler.

use std::sync::Arc;

use async_trait::async_trait;

use frontdesk_core::result::AppResult;
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;
use frontdesk_entity::source::SourceEntity;

use super::{EventHandler, unexpected_event};
use crate::notification::{NotificationRequest, NotificationService};

/// Notifies the users mentioned in a chat message, never its sender.
#[derive(Debug, Clone)]
pub struct ChatMentionedHandler {
    service: Arc<NotificationService>,
}

impl ChatMentionedHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for ChatMentionedHandler {
    fn kind(&self) -> EventType {
        EventType::ChatMentioned
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::UserMentionedInChat { message, sender } = event else {
            return Err(unexpected_event(self.kind(), event));
        };
        if !message.has_mentions() {
            return Ok(0);
        }

        let request = NotificationRequest::new(
            message.tenant_id,
            message.mentioned_user_ids.clone(),
            self.kind(),
            SourceEntity::from(message),
            "You were mentioned",
            format!("{} mentioned you in a chat", sender.name),
        )
        .with_actor(sender.id);

        self.service.notify(request).await
    }
}
