//! Typed domain events consumed by the event translation layer.

use serde::{Deserialize, Serialize};

use frontdesk_core::types::{TenantId, UserId};

use crate::notification::EventType;
use crate::source::{ChatMessage, Meeting, Task, VideoRoom};
use crate::user::{User, UserRole};

/// A domain action that may produce notifications.
///
/// Each variant carries the source entity and whatever the recipient
/// selection rule for that event needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A task was assigned. Notifies the assignee, never the assigner.
    TaskAssigned {
        /// The task, with `assigned_to` set to the new assignee.
        task: Task,
        /// The user who made the assignment.
        assigner: User,
    },
    /// A task passed its due date. Notifies the assignee and every manager.
    TaskOverdue {
        /// The overdue task.
        task: Task,
    },
    /// A task was completed. Notifies the creator, never the completer.
    TaskCompleted {
        /// The completed task.
        task: Task,
        /// The user who completed it.
        completed_by: UserId,
    },
    /// A meeting is about to start. Notifies every participant.
    MeetingReminder {
        /// The upcoming meeting.
        meeting: Meeting,
    },
    /// A meeting was cancelled. Notifies every participant but the canceller.
    MeetingCancelled {
        /// The cancelled meeting.
        meeting: Meeting,
        /// The user who cancelled it.
        cancelled_by: UserId,
    },
    /// Users were mentioned in chat. Notifies the mentioned users, never the
    /// sender.
    UserMentionedInChat {
        /// The message containing the mentions.
        message: ChatMessage,
        /// The author, used for the rendered message.
        sender: User,
    },
    /// A video room went live. Notifies the invited participants, never the
    /// starter.
    VideoRoomStarted {
        /// The room.
        room: VideoRoom,
        /// Invited participants.
        #[serde(default)]
        invited_participants: Vec<UserId>,
    },
    /// A tenant-wide alert. Notifies every user holding one of the target roles.
    SystemAlertBroadcast {
        /// Target tenant.
        tenant_id: TenantId,
        /// Alert title.
        title: String,
        /// Alert body.
        message: String,
        /// Roles that receive the alert.
        target_roles: Vec<UserRole>,
        /// Optional sender, excluded from the recipients.
        #[serde(default)]
        sender: Option<UserId>,
    },
}

impl DomainEvent {
    /// The notification event type this domain event produces.
    pub fn kind(&self) -> EventType {
        match self {
            Self::TaskAssigned { .. } => EventType::TaskAssigned,
            Self::TaskOverdue { .. } => EventType::TaskOverdue,
            Self::TaskCompleted { .. } => EventType::TaskCompleted,
            Self::MeetingReminder { .. } => EventType::MeetingReminder,
            Self::MeetingCancelled { .. } => EventType::MeetingCancelled,
            Self::UserMentionedInChat { .. } => EventType::ChatMentioned,
            Self::VideoRoomStarted { .. } => EventType::VideoStarted,
            Self::SystemAlertBroadcast { .. } => EventType::SystemAlert,
        }
    }

    /// The tenant the event happened in.
    pub fn tenant_id(&self) -> TenantId {
        match self {
            Self::TaskAssigned { task, .. }
            | Self::TaskOverdue { task }
            | Self::TaskCompleted { task, .. } => task.tenant_id,
            Self::MeetingReminder { meeting } | Self::MeetingCancelled { meeting, .. } => {
                meeting.tenant_id
            }
            Self::UserMentionedInChat { message, .. } => message.tenant_id,
            Self::VideoRoomStarted { room, .. } => room.tenant_id,
            Self::SystemAlertBroadcast { tenant_id, .. } => *tenant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_alert_from_json() {
        let tenant_id = TenantId::new();
        let json = serde_json::json!({
            "type": "system_alert_broadcast",
            "tenant_id": tenant_id,
            "title": "Fire drill",
            "message": "Fire drill at 14:00",
            "target_roles": ["manager", "staff"],
        });
        let event: DomainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.kind(), EventType::SystemAlert);
        assert_eq!(event.tenant_id(), tenant_id);
        match event {
            DomainEvent::SystemAlertBroadcast {
                target_roles,
                sender,
                ..
            } => {
                assert_eq!(target_roles, vec![UserRole::Manager, UserRole::Staff]);
                assert!(sender.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let json = serde_json::json!({ "type": "task_deleted" });
        assert!(serde_json::from_value::<DomainEvent>(json).is_err());
    }
}
