//! Source entities that can trigger notifications.
//!
//! These records are owned by other subsystems (agenda, calendar, chat,
//! video). The notification engine only reads them.

pub mod chat;
pub mod meeting;
pub mod task;
pub mod video;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frontdesk_core::types::TenantId;

use crate::tenant::Tenant;

pub use chat::ChatMessage;
pub use meeting::Meeting;
pub use task::Task;
pub use video::{VideoRoom, VideoRoomStatus};

/// Concrete kind of a source entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// An agenda task.
    Task,
    /// A calendar meeting.
    Meeting,
    /// A chat message.
    ChatMessage,
    /// A video room.
    VideoRoom,
    /// The tenant itself, used for tenant-wide alerts.
    Tenant,
    /// Any other kind, carried by name.
    Other(String),
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Meeting => write!(f, "meeting"),
            Self::ChatMessage => write!(f, "chat_message"),
            Self::VideoRoom => write!(f, "video_room"),
            Self::Tenant => write!(f, "tenant"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// The minimal view of a triggering entity: its kind, its identifier, and
/// its owning tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntity {
    /// Concrete kind.
    pub kind: SourceKind,
    /// Opaque identifier, captured verbatim on the notification.
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: TenantId,
}

impl SourceEntity {
    /// Create a source entity reference.
    pub fn new(kind: SourceKind, id: Uuid, tenant_id: TenantId) -> Self {
        Self {
            kind,
            id,
            tenant_id,
        }
    }
}

impl From<&Task> for SourceEntity {
    fn from(task: &Task) -> Self {
        Self::new(SourceKind::Task, task.id.into_uuid(), task.tenant_id)
    }
}

impl From<&Meeting> for SourceEntity {
    fn from(meeting: &Meeting) -> Self {
        Self::new(SourceKind::Meeting, meeting.id.into_uuid(), meeting.tenant_id)
    }
}

impl From<&ChatMessage> for SourceEntity {
    fn from(message: &ChatMessage) -> Self {
        Self::new(
            SourceKind::ChatMessage,
            message.id.into_uuid(),
            message.tenant_id,
        )
    }
}

impl From<&VideoRoom> for SourceEntity {
    fn from(room: &VideoRoom) -> Self {
        Self::new(SourceKind::VideoRoom, room.id.into_uuid(), room.tenant_id)
    }
}

impl From<&Tenant> for SourceEntity {
    fn from(tenant: &Tenant) -> Self {
        Self::new(SourceKind::Tenant, tenant.id.into_uuid(), tenant.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use frontdesk_core::types::{TaskId, UserId};

    #[test]
    fn test_from_task_keeps_identifier() {
        let task = Task {
            id: TaskId::new(),
            tenant_id: TenantId::new(),
            title: "Restock minibar".to_string(),
            assigned_to: Some(UserId::new()),
            created_by: UserId::new(),
            due_at: None,
            created_at: Utc::now(),
        };
        let source = SourceEntity::from(&task);
        assert_eq!(source.kind, SourceKind::Task);
        assert_eq!(source.id, task.id.into_uuid());
        assert_eq!(source.tenant_id, task.tenant_id);
    }

    #[test]
    fn test_other_kind_serde() {
        let kind = SourceKind::Other("invoice".to_string());
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json, serde_json::json!({ "other": "invoice" }));
        assert_eq!(kind.to_string(), "invoice");
        assert_eq!(
            serde_json::to_value(SourceKind::ChatMessage).unwrap(),
            serde_json::json!("chat_message")
        );
    }
}
