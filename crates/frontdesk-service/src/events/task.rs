//! Task event handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use frontdesk_core::result::AppResult;
use frontdesk_core::types::UserId;
use frontdesk_database::store::Directory;
use frontdesk_entity::event::DomainEvent;
use frontdesk_entity::notification::EventType;
use frontdesk_entity::source::SourceEntity;
use frontdesk_entity::user::UserRole;

use super::{EventHandler, unexpected_event};
use crate::notification::{NotificationRequest, NotificationService};

/// Notifies the assignee of a task, never the assigner.
#[derive(Debug, Clone)]
pub struct TaskAssignedHandler {
    service: Arc<NotificationService>,
}

impl TaskAssignedHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for TaskAssignedHandler {
    fn kind(&self) -> EventType {
        EventType::TaskAssigned
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::TaskAssigned { task, assigner } = event else {
            return Err(unexpected_event(self.kind(), event));
        };
        let Some(assignee) = task.assigned_to else {
            return Ok(0);
        };

        let mut context = Map::new();
        context.insert("assigned_by".to_string(), Value::from(assigner.name.clone()));

        let request = NotificationRequest::new(
            task.tenant_id,
            assignee,
            self.kind(),
            SourceEntity::from(task),
            "New Task Assigned",
            format!("You have been assigned '{}'", task.title),
        )
        .with_context(context)
        .with_actor(assigner.id);

        self.service.notify(request).await
    }
}

/// Notifies the assignee and every manager of the tenant.
#[derive(Debug, Clone)]
pub struct TaskOverdueHandler {
    service: Arc<NotificationService>,
    directory: Arc<dyn Directory>,
}

impl TaskOverdueHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>, directory: Arc<dyn Directory>) -> Self {
        Self { service, directory }
    }
}

#[async_trait]
impl EventHandler for TaskOverdueHandler {
    fn kind(&self) -> EventType {
        EventType::TaskOverdue
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::TaskOverdue { task } = event else {
            return Err(unexpected_event(self.kind(), event));
        };

        let mut recipients: Vec<UserId> = self
            .directory
            .find_users_by_roles(task.tenant_id, &[UserRole::Manager])
            .await?
            .into_iter()
            .map(|user| user.id)
            .collect();
        recipients.extend(task.assigned_to);

        let mut context = Map::new();
        if let Some(due_at) = task.due_at {
            context.insert("due_at".to_string(), Value::from(due_at.to_rfc3339()));
        }

        let request = NotificationRequest::new(
            task.tenant_id,
            recipients,
            self.kind(),
            SourceEntity::from(task),
            "Task Overdue",
            format!("Task '{}' is past its due date", task.title),
        )
        .with_context(context);

        self.service.notify(request).await
    }
}

/// Notifies the creator of a task, never the completer.
#[derive(Debug, Clone)]
pub struct TaskCompletedHandler {
    service: Arc<NotificationService>,
}

impl TaskCompletedHandler {
    /// Creates a new handler.
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for TaskCompletedHandler {
    fn kind(&self) -> EventType {
        EventType::TaskCompleted
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<u64> {
        let DomainEvent::TaskCompleted { task, completed_by } = event else {
            return Err(unexpected_event(self.kind(), event));
        };

        let request = NotificationRequest::new(
            task.tenant_id,
            task.created_by,
            self.kind(),
            SourceEntity::from(task),
            "Task Completed",
            format!("Task '{}' has been marked as complete", task.title),
        )
        .with_actor(*completed_by);

        self.service.notify(request).await
    }
}
