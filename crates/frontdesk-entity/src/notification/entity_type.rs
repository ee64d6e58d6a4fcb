//! Entity type tags for notification sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use frontdesk_core::AppError;

/// Canonical tag of the entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_entity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Agenda task.
    Task,
    /// Calendar meeting.
    Meeting,
    /// Chat message.
    ChatMessage,
    /// Video room.
    VideoRoom,
    /// Tenant-wide or otherwise unclassified source.
    System,
}

impl EntityType {
    /// Return the tag as stored, e.g. `chat_message`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Meeting => "meeting",
            Self::ChatMessage => "chat_message",
            Self::VideoRoom => "video_room",
            Self::System => "system",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(Self::Task),
            "meeting" => Ok(Self::Meeting),
            "chat_message" => Ok(Self::ChatMessage),
            "video_room" => Ok(Self::VideoRoom),
            "system" => Ok(Self::System),
            _ => Err(AppError::validation(format!("Invalid entity type: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&EntityType::ChatMessage).unwrap();
        assert_eq!(json, "\"chat_message\"");
        assert_eq!("video_room".parse::<EntityType>().unwrap(), EntityType::VideoRoom);
    }
}
