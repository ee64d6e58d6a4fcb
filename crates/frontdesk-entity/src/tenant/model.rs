//! Tenant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use frontdesk_core::types::TenantId;

/// An isolated customer context. Every user and notification is scoped to
/// exactly one tenant. Created out-of-band and never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// IANA timezone name, e.g. `Europe/Lisbon`.
    pub timezone: String,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
}
