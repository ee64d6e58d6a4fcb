//! Notification event type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use frontdesk_core::AppError;

/// The fixed set of events that produce notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_event_type")]
pub enum EventType {
    /// A task was assigned to someone.
    #[serde(rename = "task.assigned")]
    #[sqlx(rename = "task.assigned")]
    TaskAssigned,
    /// A task passed its due date.
    #[serde(rename = "task.overdue")]
    #[sqlx(rename = "task.overdue")]
    TaskOverdue,
    /// A task was marked complete.
    #[serde(rename = "task.completed")]
    #[sqlx(rename = "task.completed")]
    TaskCompleted,
    /// A meeting is about to start.
    #[serde(rename = "meeting.reminder")]
    #[sqlx(rename = "meeting.reminder")]
    MeetingReminder,
    /// A meeting was cancelled.
    #[serde(rename = "meeting.cancelled")]
    #[sqlx(rename = "meeting.cancelled")]
    MeetingCancelled,
    /// A user was mentioned in a chat message.
    #[serde(rename = "chat.mentioned")]
    #[sqlx(rename = "chat.mentioned")]
    ChatMentioned,
    /// A video room went live.
    #[serde(rename = "video.started")]
    #[sqlx(rename = "video.started")]
    VideoStarted,
    /// A tenant-wide alert was broadcast.
    #[serde(rename = "system.alert")]
    #[sqlx(rename = "system.alert")]
    SystemAlert,
}

impl EventType {
    /// Every event type.
    pub const ALL: [EventType; 8] = [
        Self::TaskAssigned,
        Self::TaskOverdue,
        Self::TaskCompleted,
        Self::MeetingReminder,
        Self::MeetingCancelled,
        Self::ChatMentioned,
        Self::VideoStarted,
        Self::SystemAlert,
    ];

    /// Return the dotted wire name, e.g. `task.assigned`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskAssigned => "task.assigned",
            Self::TaskOverdue => "task.overdue",
            Self::TaskCompleted => "task.completed",
            Self::MeetingReminder => "meeting.reminder",
            Self::MeetingCancelled => "meeting.cancelled",
            Self::ChatMentioned => "chat.mentioned",
            Self::VideoStarted => "video.started",
            Self::SystemAlert => "system.alert",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TaskAssigned => "Task Assigned",
            Self::TaskOverdue => "Task Overdue",
            Self::TaskCompleted => "Task Completed",
            Self::MeetingReminder => "Meeting Reminder",
            Self::MeetingCancelled => "Meeting Cancelled",
            Self::ChatMentioned => "Chat Mention",
            Self::VideoStarted => "Video Started",
            Self::SystemAlert => "System Alert",
        }
    }

    /// Product area the event belongs to.
    pub fn category(&self) -> &'static str {
        match self {
            Self::TaskAssigned | Self::TaskOverdue | Self::TaskCompleted => "Agenda",
            Self::MeetingReminder | Self::MeetingCancelled => "Calendar",
            Self::ChatMentioned => "Chat",
            Self::VideoStarted => "Video",
            Self::SystemAlert => "System",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid event type: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_roundtrip() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.as_str().parse::<EventType>().unwrap(), event_type);
            let json = serde_json::to_string(&event_type).unwrap();
            assert_eq!(json, format!("\"{}\"", event_type.as_str()));
        }
    }

    #[test]
    fn test_unknown_event_type() {
        assert!("task.deleted".parse::<EventType>().is_err());
    }

    #[test]
    fn test_category() {
        assert_eq!(EventType::TaskOverdue.category(), "Agenda");
        assert_eq!(EventType::MeetingCancelled.category(), "Calendar");
        assert_eq!(EventType::SystemAlert.label(), "System Alert");
    }
}
