//! Video room model.

use serde::{Deserialize, Serialize};

use frontdesk_core::types::{TenantId, UserId, VideoRoomId};

/// Lifecycle state of a video room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoRoomStatus {
    /// The room is live.
    Active,
    /// The session has ended.
    Ended,
}

/// A video conferencing room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRoom {
    /// Unique room identifier.
    pub id: VideoRoomId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Room name.
    pub name: String,
    /// User who started the session.
    pub started_by: UserId,
    /// Current status.
    pub status: VideoRoomStatus,
}
