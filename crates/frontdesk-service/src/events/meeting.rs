//! Meeting event handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use frontdesk_core::result::AppResult;
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;
use frontdesk_entity::source::SourceEntity;

use super::{EventHandler, unexpected_event};
use crate::notification::{NotificationRequest, NotificationService};

/// Notifies every participant that a meeting is about to start.
#[derive(Debug, Clone)]
pub struct MeetingReminderHandler {
    service: Arc<NotificationService>,
}

impl MeetingReminderHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for MeetingReminderHandler {
    fn kind(&self) -> EventType {
        EventType::MeetingReminder
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::MeetingReminder { meeting } = event else {
            return Err(unexpected_event(self.kind(), event));
        };

        let mut context = Map::new();
        context.insert(
            "starts_at".to_string(),
            Value::from(meeting.starts_at.to_rfc3339()),
        );

        let request = NotificationRequest::new(
            meeting.tenant_id,
            meeting.participant_ids.clone(),
            self.kind(),
            SourceEntity::from(meeting),
            "Meeting Reminder",
            format!("'{}' is starting soon", meeting.title),
        )
        .with_context(context);

        self.service.notify(request).await
    }
}

/// Notifies every participant but the canceller.
#[derive(Debug, Clone)]
pub struct MeetingCancelledHandler {
    service: Arc<NotificationService>,
}

impl MeetingCancelledHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for MeetingCancelledHandler {
    fn kind(&self) -> EventType {
        EventType::MeetingCancelled
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::MeetingCancelled {
            meeting,
            cancelled_by,
        } = event
        else {
            return Err(unexpected_event(self.kind(), event));
        };

        let request = NotificationRequest::new(
            meeting.tenant_id,
            meeting.participant_ids.clone(),
            self.kind(),
            SourceEntity::from(meeting),
            "Meeting Cancelled",
            format!("'{}' has been cancelled", meeting.title),
        )
        .with_actor(*cancelled_by);

        self.service.notify(request).await
    }
}
