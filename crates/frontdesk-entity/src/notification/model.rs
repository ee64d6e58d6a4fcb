//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use frontdesk_core::types::{NotificationId, TenantId, UserId};

use super::entity_type::EntityType;
use super::event_type::EventType;

/// Unordered key-value payload used for rendering-time interpolation.
pub type NotificationContext = Map<String, Value>;

/// A persisted in-app notification for one recipient in one tenant.
///
/// Everything except the read state is fixed at creation. The read state
/// moves forward exactly once, from unread to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// The recipient.
    pub user_id: UserId,
    /// Event that produced this notification.
    pub event_type: EventType,
    /// Tag of the source entity.
    pub entity_type: EntityType,
    /// Identifier of the source entity.
    pub entity_id: Uuid,
    /// Client-side navigation path.
    pub deep_link: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Rendering context. Absent rather than empty.
    pub context: Option<Value>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was first read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// The five fields that identify one logical occurrence for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DedupKey {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// The recipient.
    pub user_id: UserId,
    /// Event type.
    pub event_type: EventType,
    /// Source entity tag.
    pub entity_type: EntityType,
    /// Source entity identifier.
    pub entity_id: Uuid,
}

/// Rendered content shared by every record of one fan-out call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    /// Client-side navigation path.
    pub deep_link: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Rendering context.
    pub context: Option<NotificationContext>,
}

impl Notification {
    /// Create a new unread notification.
    ///
    /// An empty context is normalized to `None`.
    pub fn new(key: DedupKey, content: &NotificationContent, created_at: DateTime<Utc>) -> Self {
        let context = content
            .context
            .as_ref()
            .filter(|map| !map.is_empty())
            .map(|map| Value::Object(map.clone()));

        Self {
            id: NotificationId::new(),
            tenant_id: key.tenant_id,
            user_id: key.user_id,
            event_type: key.event_type,
            entity_type: key.entity_type,
            entity_id: key.entity_id,
            deep_link: content.deep_link.clone(),
            title: content.title.clone(),
            message: content.message.clone(),
            context,
            is_read: false,
            read_at: None,
            created_at,
        }
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Transition to read. Returns `false` (and leaves `read_at` untouched)
    /// when the notification was already read.
    pub fn mark_read(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(at);
        true
    }

    /// Whether this notification is in the given tenant and recipient scope.
    pub fn belongs_to(&self, tenant_id: TenantId, user_id: UserId) -> bool {
        self.tenant_id == tenant_id && self.user_id == user_id
    }

    /// The deduplication key of this record.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            tenant_id: self.tenant_id,
            user_id: self.user_id,
            event_type: self.event_type,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn key() -> DedupKey {
        DedupKey {
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
            event_type: EventType::TaskAssigned,
            entity_type: EntityType::Task,
            entity_id: Uuid::new_v4(),
        }
    }

    fn content(context: Option<NotificationContext>) -> NotificationContent {
        NotificationContent {
            deep_link: "/agenda/tasks/1".to_string(),
            title: "New Task Assigned".to_string(),
            message: "You have been assigned 'Restock minibar'".to_string(),
            context,
        }
    }

    #[test]
    fn test_new_is_unread() {
        let key = key();
        let notification = Notification::new(key, &content(None), Utc::now());
        assert!(notification.is_unread());
        assert!(notification.read_at.is_none());
        assert_eq!(notification.dedup_key(), key);
    }

    #[test]
    fn test_empty_context_is_absent() {
        let notification = Notification::new(key(), &content(Some(Map::new())), Utc::now());
        assert!(notification.context.is_none());

        let mut map = Map::new();
        map.insert("assigned_by".to_string(), Value::from("Maria"));
        let notification = Notification::new(key(), &content(Some(map)), Utc::now());
        assert_eq!(
            notification.context,
            Some(serde_json::json!({ "assigned_by": "Maria" }))
        );
    }

    #[test]
    fn test_mark_read_is_forward_only() {
        let mut notification = Notification::new(key(), &content(None), Utc::now());
        let first = Utc::now();
        assert!(notification.mark_read(first));
        assert_eq!(notification.read_at, Some(first));

        assert!(!notification.mark_read(first + Duration::minutes(3)));
        assert_eq!(notification.read_at, Some(first));
        assert!(notification.is_read);
    }

    #[test]
    fn test_belongs_to() {
        let key = key();
        let notification = Notification::new(key, &content(None), Utc::now());
        assert!(notification.belongs_to(key.tenant_id, key.user_id));
        assert!(!notification.belongs_to(TenantId::new(), key.user_id));
        assert!(!notification.belongs_to(key.tenant_id, UserId::new()));
    }
}
