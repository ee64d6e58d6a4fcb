//! Video room handler.

use std::sync::Arc;

use async_trait::async_trait;

use frontdesk_core::result::AppResult;
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;
use frontdesk_entity::source::SourceEntity;

use super::{EventHandler, unexpected_event};
use crate::notification::{NotificationRequest, NotificationService};

/// Notifies the invited participants that a room went live, never the
/// user who started it.
#[derive(Debug, Clone)]
pub struct VideoStartedHandler {
    service: Arc<NotificationService>,
}

impl VideoStartedHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for VideoStartedHandler {
    fn kind(&self) -> EventType {
        EventType::VideoStarted
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::VideoRoomStarted {
            room,
            invited_participants,
        } = event
        else {
            return Err(unexpected_event(self.kind(), event));
        };

        let request = NotificationRequest::new(
            room.tenant_id,
            invited_participants.clone(),
            self.kind(),
            SourceEntity::from(room),
            "Video Room Started",
            format!("'{}' is now live", room.name),
        )
        .with_actor(room.started_by);

        self.service.notify(request).await
    }
}
