//! Input of one fan-out call.

use frontdesk_core::types::{TenantId, UserId};
use frontdesk_entity::notification::{EventType, NotificationContext};
use frontdesk_entity::source::SourceEntity;

use super::recipients::Recipients;

/// Everything [`NotificationService::notify`](super::NotificationService::notify)
/// needs to fan one event out.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    /// Isolation boundary for every created record.
    pub tenant_id: TenantId,
    /// Candidate recipients.
    pub recipients: Recipients,
    /// Event type.
    pub event_type: EventType,
    /// The triggering entity.
    pub source: SourceEntity,
    /// Title, stored verbatim.
    pub title: String,
    /// Body, stored verbatim.
    pub message: String,
    /// Explicit deep link; resolved from `source` when absent.
    pub deep_link: Option<String>,
    /// Rendering context; an empty map is treated as absent.
    pub context: Option<NotificationContext>,
    /// The user who caused the event. Never notified.
    pub actor: Option<UserId>,
}

impl NotificationRequest {
    /// Creates a request without deep link, context, or actor.
    pub fn new(
        tenant_id: TenantId,
        recipients: impl Into<Recipients>,
        event_type: EventType,
        source: SourceEntity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            recipients: recipients.into(),
            event_type,
            source,
            title: title.into(),
            message: message.into(),
            deep_link: None,
            context: None,
            actor: None,
        }
    }

    /// Sets an explicit deep link.
    pub fn with_deep_link(mut self, deep_link: impl Into<String>) -> Self {
        self.deep_link = Some(deep_link.into());
        self
    }

    /// Sets the rendering context.
    pub fn with_context(mut self, context: NotificationContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the actor to exclude from the recipients.
    pub fn with_actor(mut self, actor: impl Into<Option<UserId>>) -> Self {
        self.actor = actor.into();
        self
    }
}
