//! Chat message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use frontdesk_core::types::{ChatMessageId, TenantId, UserId};

/// A message posted in a chat room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: ChatMessageId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Room the message was posted in.
    pub room_id: Uuid,
    /// Author.
    pub sender_id: UserId,
    /// Message text.
    pub body: String,
    /// Users mentioned in the body, as extracted by the chat subsystem.
    #[serde(default)]
    pub mentioned_user_ids: Vec<UserId>,
    /// When the message was posted.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Whether anyone is mentioned.
    pub fn has_mentions(&self) -> bool {
        !self.mentioned_user_ids.is_empty()
    }
}
