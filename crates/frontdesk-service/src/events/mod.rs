//! Event translation layer.
//!
//! One handler per event type turns a [`DomainEvent`] into a
//! [`NotificationRequest`](crate::notification::NotificationRequest) with
//! the right recipients, actor, and rendered text. The [`EventRegistry`] is
//! built once at startup and passed to whoever produces events.

pub mod chat;
pub mod meeting;
pub mod system;
pub mod task;
pub mod video;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use frontdesk_core::error::AppError;
use frontdesk_core::result::AppResult;
use frontdesk_database::store::Directory;
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;

use crate::notification::NotificationService;

pub use chat::ChatMentionedHandler;
pub use meeting::{MeetingCancelledHandler, MeetingReminderHandler};
pub use system::SystemAlertHandler;
pub use task::{TaskAssignedHandler, TaskCompletedHandler, TaskOverdueHandler};
pub use video::VideoStartedHandler;

/// Translates one kind of domain event into notifications.
#[async_trait]
pub trait EventHandler: Send + Sync + std::fmt::Debug {
    /// The event type this handler processes.
    fn kind(&self) -> EventType;

    /// Handle the event. Returns how many notifications were created.
    async fn handle(&self, event: &DomainEvent) -> AppResult<u64>;
}

/// Static table of event type to handler.
#[derive(Debug, Default)]
pub struct EventRegistry {
    handlers: HashMap<EventType, Arc<dyn EventHandler>>,
}

impl EventRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with a handler for every event type.
    pub fn with_default_handlers(
        service: Arc<NotificationService>,
        directory: Arc<dyn Directory>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TaskAssignedHandler::new(Arc::clone(&service))));
        registry.register(Arc::new(TaskOverdueHandler::new(
            Arc::clone(&service),
            Arc::clone(&directory),
        )));
        registry.register(Arc::new(TaskCompletedHandler::new(Arc::clone(&service))));
        registry.register(Arc::new(MeetingReminderHandler::new(Arc::clone(&service))));
        registry.register(Arc::new(MeetingCancelledHandler::new(Arc::clone(&service))));
        registry.register(Arc::new(ChatMentionedHandler::new(Arc::clone(&service))));
        registry.register(Arc::new(VideoStartedHandler::new(Arc::clone(&service))));
        registry.register(Arc::new(SystemAlertHandler::new(service, directory)));
        registry
    }

    /// Registers a handler, replacing any previous one for the same type.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        let kind = handler.kind();
        debug!(event_type = %kind, "Registered event handler");
        self.handlers.insert(kind, handler);
    }

    /// Routes an event to its handler.
    pub async fn dispatch(&self, event: &DomainEvent) -> AppResult<u64> {
        let kind = event.kind();
        let handler = self.handlers.get(&kind).ok_or_else(|| {
            AppError::validation(format!("No handler registered for event type '{kind}'"))
        })?;

        info!(
            event_type = %kind,
            tenant_id = %event.tenant_id(),
            "Dispatching domain event"
        );
        handler.handle(event).await
    }

    /// Whether a handler is registered for the event type.
    pub fn has_handler(&self, kind: EventType) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Registered event types, in declaration order.
    pub fn registered_kinds(&self) -> Vec<EventType> {
        EventType::ALL
            .into_iter()
            .filter(|kind| self.handlers.contains_key(kind))
            .collect()
    }
}

/// Error for an event routed to the wrong handler.
fn unexpected_event(expected: EventType, event: &DomainEvent) -> AppError {
    AppError::internal(format!(
        "Handler for '{expected}' received '{}' event",
        event.kind()
    ))
}
