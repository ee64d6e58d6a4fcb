//! Calendar meeting model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frontdesk_core::types::{MeetingId, TenantId, UserId};

/// A scheduled meeting with a participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier.
    pub id: MeetingId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Meeting title.
    pub title: String,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Organizer.
    pub created_by: UserId,
    /// Participants, organizer included when attending.
    #[serde(default)]
    pub participant_ids: Vec<UserId>,
}
